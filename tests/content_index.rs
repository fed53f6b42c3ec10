use std::collections::HashSet;
use std::fs;
use std::path::Path;

use mdxblog::content::{ContentError, ContentIndex, Field, PostId, Projection};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn post(title: &str, date: &str) -> String {
    format!(
        "---\ntitle: {}\ndate: '{}'\ndescription: About {}\n---\n\nBody of {}.\n",
        title, date, title, title
    )
}

/// `tech` with two posts, `life` with one, both with descriptors
fn blog_fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "tech/meta.json",
        r#"{"title": "Tech", "description": "Programming notes"}"#,
    );
    write(root, "tech/first-steps.mdx", &post("First steps", "2023-01-05"));
    write(root, "tech/going-further.mdx", &post("Going further", "2023-02-10"));
    write(
        root,
        "life/meta.json",
        r#"{"title": "Life", "description": "Everything else"}"#,
    );
    write(root, "life/moving.mdx", &post("Moving", "2023-03-01"));
    dir
}

fn slugs(records: &[mdxblog::content::ContentRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.slug().unwrap().to_string())
        .collect()
}

#[test]
fn all_posts_newest_first_across_categories() {
    let dir = blog_fixture();
    let index = ContentIndex::new(dir.path());

    let posts = index
        .all_posts(&Projection::new([Field::Slug, Field::Date]))
        .unwrap();

    assert_eq!(
        slugs(&posts),
        vec!["life/moving", "tech/going-further", "tech/first-steps"]
    );
    assert_eq!(posts[1].date(), Some("2023-02-10"));
    assert_eq!(posts[2].date(), Some("2023-01-05"));
}

#[test]
fn title_projection_returns_only_title() {
    let dir = blog_fixture();
    let index = ContentIndex::new(dir.path());

    let record = index
        .load_post(
            &PostId::new("tech", "first-steps"),
            &Projection::new([Field::Title]),
        )
        .unwrap();

    assert_eq!(record.fields().collect::<Vec<_>>(), vec![Field::Title]);
    assert_eq!(record.title(), Some("First steps"));
}

#[test]
fn projection_key_set_is_requested_intersect_available() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "notes/short.mdx",
        "---\ntitle: Short\nimage: /images/short.png\n---\nText\n",
    );
    let index = ContentIndex::new(dir.path());
    let id = PostId::new("notes", "short");

    let requests: Vec<Vec<Field>> = vec![
        vec![],
        vec![Field::Slug],
        vec![Field::Content, Field::Date],
        vec![Field::Title, Field::Description, Field::Image],
        Field::ALL.to_vec(),
    ];
    let available: HashSet<Field> = [Field::Slug, Field::Content, Field::Title, Field::Image]
        .into_iter()
        .collect();

    for request in requests {
        let record = index
            .load_post(&id, &Projection::new(request.iter().copied()))
            .unwrap();
        let got: HashSet<Field> = record.fields().collect();
        let want: HashSet<Field> = request
            .iter()
            .copied()
            .filter(|f| available.contains(f))
            .collect();
        assert_eq!(got, want, "request {:?}", request);
    }
}

#[test]
fn unknown_field_names_are_rejected() {
    let err = Projection::parse(["slug", "titel"]).unwrap_err();
    assert!(matches!(err, ContentError::UnknownField(name) if name == "titel"));
}

#[test]
fn string_and_calendar_orders_differ_without_zero_padding() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "tech/meta.json", r#"{"title": "Tech", "description": ""}"#);
    // As strings "2023-9-1" > "2023-10-01"; as dates October is later.
    write(root, "tech/september.mdx", &post("September", "2023-9-1"));
    write(root, "tech/october.mdx", &post("October", "2023-10-01"));

    let index = ContentIndex::new(root);
    let projection = Projection::new([Field::Slug]);

    let all = index.all_posts(&projection).unwrap();
    assert_eq!(slugs(&all), vec!["tech/september", "tech/october"]);

    let category = index.category_posts("tech", &projection).unwrap();
    assert_eq!(slugs(&category), vec!["tech/october", "tech/september"]);
}

#[test]
fn equal_dates_keep_scan_order() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "a/one.mdx", &post("One", "2023-05-05"));
    write(root, "a/two.mdx", &post("Two", "2023-05-05"));
    write(root, "b/three.mdx", &post("Three", "2023-05-05"));

    let index = ContentIndex::new(root);
    let all = index.all_posts(&Projection::new([Field::Slug])).unwrap();
    assert_eq!(slugs(&all), vec!["a/one", "a/two", "b/three"]);
}

#[test]
fn slugs_are_unique_in_all_posts() {
    let dir = blog_fixture();
    // Same file stem in another category
    write(dir.path(), "life/first-steps.mdx", &post("Baby steps", "2022-06-01"));
    let index = ContentIndex::new(dir.path());

    let posts = index.all_posts(&Projection::new([Field::Slug])).unwrap();
    let unique: HashSet<_> = slugs(&posts).into_iter().collect();
    assert_eq!(unique.len(), posts.len());
    assert!(unique.contains("life/first-steps"));
    assert!(unique.contains("tech/first-steps"));
}

#[test]
fn category_metadata_is_stable() {
    let dir = blog_fixture();
    let index = ContentIndex::new(dir.path());

    let first = index.category_meta("tech").unwrap();
    let second = index.category_meta("tech").unwrap();
    assert_eq!(first, second);
    assert_eq!(first.title, "Tech");
    assert_eq!(first.description, "Programming notes");
}

#[test]
fn missing_descriptor_fails_category_page() {
    let dir = blog_fixture();
    write(dir.path(), "drafts/idea.mdx", &post("Idea", "2023-04-01"));
    let index = ContentIndex::new(dir.path());

    let err = index
        .category_page("drafts", &Projection::new([Field::Title]))
        .unwrap_err();
    assert!(matches!(err, ContentError::NotFound(_)));

    // Categories with a descriptor are unaffected
    let listing = index
        .category_page("tech", &Projection::new([Field::Slug]))
        .unwrap();
    assert_eq!(listing.meta.title, "Tech");
    assert_eq!(
        slugs(&listing.posts),
        vec!["tech/going-further", "tech/first-steps"]
    );
}

#[test]
fn missing_post_is_not_found_and_never_listed() {
    let dir = blog_fixture();
    let index = ContentIndex::new(dir.path());

    let err = index
        .load_post(&PostId::new("tech", "ghost"), &Projection::all())
        .unwrap_err();
    assert!(matches!(err, ContentError::NotFound(_)));

    let err = index
        .load_post_by_slug("tech/ghost", &Projection::all())
        .unwrap_err();
    assert!(err.is_not_found());

    let posts = index.all_posts(&Projection::new([Field::Slug])).unwrap();
    assert!(!slugs(&posts).contains(&"tech/ghost".to_string()));
    assert_eq!(posts.len(), 3);
}

#[test]
fn descriptors_and_assets_are_not_posts() {
    let dir = blog_fixture();
    write(dir.path(), "tech/diagram.svg", "<svg/>");
    let index = ContentIndex::new(dir.path());

    let ids = index.post_ids().unwrap();
    assert_eq!(ids.len(), 3);
    assert!(ids.iter().all(|id| id.slug != "meta" && id.slug != "diagram"));
}

#[test]
fn content_field_is_body_without_front_matter() {
    let dir = blog_fixture();
    let index = ContentIndex::new(dir.path());

    let record = index
        .load_post_by_slug("life/moving.mdx", &Projection::new([Field::Content]))
        .unwrap();
    assert_eq!(record.content(), Some("\nBody of Moving.\n"));
}

#[test]
fn missing_root_is_a_filesystem_error() {
    let dir = tempfile::tempdir().unwrap();
    let index = ContentIndex::new(dir.path().join("posts"));

    let err = index.all_posts(&Projection::all()).unwrap_err();
    assert!(matches!(err, ContentError::FileSystem { .. }));
}

#[test]
fn malformed_descriptor_is_a_parse_error() {
    let dir = blog_fixture();
    write(dir.path(), "life/meta.json", r#"{"title": "Life"}"#);
    let index = ContentIndex::new(dir.path());

    let err = index.category_meta("life").unwrap_err();
    assert!(matches!(err, ContentError::Parse { .. }));
}
