/*! Integration tests for Userdesk.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * - store: UserStore invariants driven directly
 * - auth: AccessGate login and token checks
 * - service: gate + store composition
 * - server: HTTP contract over a real listener (status codes and messages)
 * - client: ApiClient against a running server
 * - scenario: the end-to-end seed walkthrough
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("userdesk=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod helpers;
mod store;
