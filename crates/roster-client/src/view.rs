//! Text rendering for the terminal front end.

use std::fmt;

use roster_shared::types::User;

pub const EMPTY_TABLE: &str = "No users registered";

/// Render users as an aligned `ID | Name | Email` table.
pub fn render_users_table(users: &[User]) -> String {
    let headers = ["ID", "Name", "Email"];
    if users.is_empty() {
        return format!(
            "{} | {} | {}\n{}\n",
            headers[0], headers[1], headers[2], EMPTY_TABLE
        );
    }

    let rows: Vec<[String; 3]> = users
        .iter()
        .map(|u| [u.id.to_string(), u.name.clone(), u.email.clone()])
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for row in &rows {
        let cells = [row[0].as_str(), row[1].as_str(), row[2].as_str()];
        push_row(&mut out, &cells, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[&str; 3], widths: &[usize; 3]) {
    let line = format!(
        "{:<w0$} | {:<w1$} | {}",
        cells[0],
        cells[1],
        cells[2],
        w0 = widths[0],
        w1 = widths[1],
    );
    out.push_str(line.trim_end());
    out.push('\n');
}

pub fn render_user(user: &User) -> String {
    format!("ID:    {}\nName:  {}\nEmail: {}\n", user.id, user.name, user.email)
}

/// A message that interrupts the user, the terminal stand-in for an alert
/// dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success(text) => write!(f, "[ok] {text}"),
            Notice::Error(text) => write!(f, "[error] {text}"),
        }
    }
}
