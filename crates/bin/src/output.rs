//! Output formatting helpers for human-readable and JSON output.

use userdesk::User;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Render a table with aligned columns.
///
/// `headers` and each row in `rows` must have the same length.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let col_count = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(col_count) {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let render = |cells: Vec<&str>| {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render(headers.to_vec())];
    for row in rows {
        lines.push(render(row.iter().take(col_count).map(String::as_str).collect()));
    }
    lines.join("\n")
}

/// Print users as a table or a JSON array.
pub fn print_users(users: &[User], format: OutputFormat) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Human => {
            if users.is_empty() {
                println!("No users found.");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = users
                .iter()
                .map(|u| {
                    vec![
                        u.id.clone(),
                        u.name.clone(),
                        u.email.clone(),
                        u.role.to_string(),
                    ]
                })
                .collect();
            println!("{}", format_table(&["ID", "NAME", "EMAIL", "ROLE"], &rows));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(users)?),
    }
    Ok(())
}

/// Print a single user as key/value lines or a JSON object.
pub fn print_user(user: &User, format: OutputFormat) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Human => {
            println!("ID:     {}", user.id);
            println!("Name:   {}", user.name);
            println!("Email:  {}", user.email);
            println!("Role:   {}", user.role);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(user)?),
    }
    Ok(())
}
