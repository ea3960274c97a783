use quill_model::PostRecord;

use super::{format_date, format_optional_date};

const SAMPLE_AUTHORS: [&str; 10] = [
    "John Doe",
    "Jane Smith",
    "Alex Johnson",
    "Sarah Williams",
    "Michael Brown",
    "Emily Davis",
    "David Wilson",
    "Lisa Anderson",
    "Robert Taylor",
    "Maria Garcia",
];

const SAMPLE_TAGS: [&str; 10] = [
    "Technology",
    "Programming",
    "Web Development",
    "React",
    "JavaScript",
    "Frontend",
    "Backend",
    "Full Stack",
    "Software Engineering",
    "Code",
];

const SAMPLE_CATEGORIES: [&str; 10] = [
    "Tech",
    "Development",
    "Tutorial",
    "Guide",
    "Tips",
    "Best Practices",
    "News",
    "Updates",
    "Features",
    "Documentation",
];

/// Byline metadata shown on the detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMeta {
    pub author_name: Option<String>,
    pub tags: Option<String>,
    pub category: Option<String>,
}

/// Metadata for `post`, filling gaps in remote posts with sample values
/// picked by the remote id.
pub fn post_meta(post: &PostRecord) -> PostMeta {
    let sample = |list: &[&str; 10]| {
        post.remote_number()
            .map(|n| list[(n % list.len() as u64) as usize].to_string())
    };
    let present = |value: Option<&str>| {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    PostMeta {
        author_name: present(post.author_name.as_deref()).or_else(|| sample(&SAMPLE_AUTHORS)),
        tags: present(post.tags.as_deref()).or_else(|| sample(&SAMPLE_TAGS)),
        category: present(Some(&post.category)).or_else(|| sample(&SAMPLE_CATEGORIES)),
    }
}

pub fn render_detail(post: &PostRecord, date_format: &str) -> String {
    let meta = post_meta(post);
    let mut lines = vec![
        post.title.clone(),
        "=".repeat(post.title.chars().count().max(3)),
    ];

    if let Some(category) = &meta.category {
        lines.push(format!("Category: {category}"));
    }
    if let Some(author) = &meta.author_name {
        lines.push(format!("Author:   {author}"));
    }
    if let Some(tags) = &meta.tags {
        let tags: Vec<&str> = tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        lines.push(format!("Tags:     {}", tags.join(", ")));
    }
    lines.push(format!(
        "Created:  {}",
        format_date(&post.created_at, date_format)
    ));
    lines.push(format!(
        "Updated:  {}",
        format_optional_date(post.updated_at.as_ref(), date_format)
    ));
    lines.push(format!("Source:   {} ({})", post.origin.label(), post.id));
    lines.push(String::new());
    lines.push(post.description.trim_end().to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use quill_model::{Origin, PostId, UserId};

    fn post(id: &str, origin: Origin) -> PostRecord {
        PostRecord {
            id: PostId::new(id).unwrap(),
            title: "Hello World".into(),
            category: String::new(),
            description: "Body text of the post.".into(),
            tags: None,
            author_name: None,
            owner_id: UserId::new("1").unwrap(),
            origin,
            created_at: Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn remote_gaps_use_sample_metadata() {
        let meta = post_meta(&post("12", Origin::Remote));
        assert_eq!(meta.author_name.as_deref(), Some("Alex Johnson"));
        assert_eq!(meta.tags.as_deref(), Some("Web Development"));
        assert_eq!(meta.category.as_deref(), Some("Tutorial"));
    }

    #[test]
    fn local_gaps_stay_empty() {
        let meta = post_meta(&post("12", Origin::Local));
        assert_eq!(
            meta,
            PostMeta {
                author_name: None,
                tags: None,
                category: None,
            }
        );
    }

    #[test]
    fn own_values_win_over_samples() {
        let mut remote = post("3", Origin::Remote);
        remote.author_name = Some("Ada".into());
        let meta = post_meta(&remote);
        assert_eq!(meta.author_name.as_deref(), Some("Ada"));
        assert_eq!(meta.category.as_deref(), Some("Guide"));
    }

    #[test]
    fn renders_detail_page() {
        let mut local = post("abc", Origin::Local);
        local.category = "Tech".into();
        local.tags = Some("rust,cli , ".into());

        insta::assert_snapshot!(render_detail(&local, "%b %-d, %Y"), @r"
        Hello World
        ===========
        Category: Tech
        Tags:     rust, cli
        Created:  Jan 5, 2024
        Updated:  N/A
        Source:   local (abc)

        Body text of the post.
        ");
    }
}
