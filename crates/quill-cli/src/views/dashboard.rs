use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use quill_model::{Origin, PostRecord, User};

use super::format_date;

/// Shown instead of the table when the user has no posts.
pub const EMPTY_DASHBOARD: &str = "Create your first blog!";

const EXCERPT_CHARS: usize = 60;

pub fn render_dashboard(user: &User, posts: &[PostRecord], date_format: &str) -> String {
    let mut out = format!("All posts for {}\n\n", user.name);
    if posts.is_empty() {
        out.push_str(EMPTY_DASHBOARD);
        out.push('\n');
        return out;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Title"),
        header_cell("Category"),
        header_cell("Description"),
        header_cell("Source"),
        header_cell("Created"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(4) {
        column.set_cell_alignment(CellAlignment::Center);
    }

    for post in posts {
        table.add_row(vec![
            Cell::new(post.id.as_str()).fg(Color::DarkGrey),
            Cell::new(&post.title).add_attribute(Attribute::Bold),
            category_cell(&post.category),
            Cell::new(excerpt(&post.description)),
            origin_cell(post.origin),
            Cell::new(format_date(&post.created_at, date_format)),
        ]);
    }

    out.push_str(&table.to_string());
    out.push('\n');
    out.push_str(&format!("{} post(s)\n", posts.len()));
    out
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Fixed(34)),
        ColumnConstraint::UpperBoundary(Width::Percentage(30)),
        ColumnConstraint::UpperBoundary(Width::Fixed(20)),
        ColumnConstraint::UpperBoundary(Width::Percentage(40)),
        ColumnConstraint::LowerBoundary(Width::Fixed(6)),
        ColumnConstraint::LowerBoundary(Width::Fixed(12)),
    ]);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn category_cell(category: &str) -> Cell {
    if category.is_empty() {
        Cell::new("-").fg(Color::DarkGrey)
    } else {
        Cell::new(category)
    }
}

fn origin_cell(origin: Origin) -> Cell {
    match origin {
        Origin::Local => Cell::new(origin.label()).fg(Color::Green),
        Origin::Remote => Cell::new(origin.label()).fg(Color::Yellow),
    }
}

/// First line of `text`, cut to [`EXCERPT_CHARS`] characters.
fn excerpt(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default().trim();
    if line.chars().count() <= EXCERPT_CHARS {
        return line.to_string();
    }
    let cut: String = line.chars().take(EXCERPT_CHARS - 3).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use quill_model::{PostId, UserId};

    fn user() -> User {
        User {
            id: UserId::new("1").unwrap(),
            email: "demo@example.com".into(),
            name: "Demo User".into(),
        }
    }

    #[test]
    fn empty_state() {
        let rendered = render_dashboard(&user(), &[], "%Y");
        assert!(rendered.contains("Create your first blog!"));
        assert!(rendered.starts_with("All posts for Demo User"));
    }

    #[test]
    fn lists_posts() {
        let post = PostRecord {
            id: PostId::new("abc123").unwrap(),
            title: "Hello World".into(),
            category: String::new(),
            description: "First line\nsecond line".into(),
            tags: None,
            author_name: None,
            owner_id: UserId::new("1").unwrap(),
            origin: Origin::Remote,
            created_at: Utc::now(),
            updated_at: None,
        };

        let rendered = render_dashboard(&user(), &[post], "%Y");

        assert!(rendered.contains("Hello World"));
        assert!(rendered.contains("First line"));
        assert!(!rendered.contains("second line"));
        assert!(rendered.contains("remote"));
        assert!(rendered.contains("1 post(s)"));
    }

    #[test]
    fn excerpt_truncates_long_text() {
        let long = "word ".repeat(30);
        let cut = excerpt(&long);
        assert!(cut.ends_with("..."));
        assert!(cut.chars().count() <= EXCERPT_CHARS);
        assert_eq!(excerpt("  short  "), "short");
    }
}
