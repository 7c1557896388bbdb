use std::{fs, path::Path, sync::Arc};

use folio::{
    application::{
        blog::BlogService,
        listing::filter_posts,
        render::ComrakRenderService,
        repos::PostsRepo,
        url_state::{parse_query, serialize_query},
    },
    domain::{
        categories::Category,
        filter::{FilterState, SortOrder},
        tags::group_by_tag,
    },
    infra::content::{ContentLoader, InMemoryPostsRepo},
};

fn write_post(dir: &Path, file: &str, slug: &str, date: &str, published: bool, tags: &str) {
    let contents = format!(
        "---\nslug: {slug}\ntitle: {slug}\ndate: {date}\npublished: {published}\ntags: {tags}\nauthor: Ada\n---\n\n# {slug}\n\nBody of {slug}.\n"
    );
    fs::write(dir.join(file), contents).expect("write post");
}

async fn load_repo(dir: &Path) -> InMemoryPostsRepo {
    let loader = ContentLoader::new(dir, Arc::new(ComrakRenderService::default()));
    let report = loader.load().await.expect("content loads");
    InMemoryPostsRepo::new(report.posts)
}

fn slugs<'a>(posts: impl IntoIterator<Item = &'a folio::domain::posts::Post>) -> Vec<&'a str> {
    posts.into_iter().map(|post| post.slug.as_str()).collect()
}

#[tokio::test]
async fn linux_posts_sort_by_date_and_match_system_not_web() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_post(dir.path(), "a.md", "january", "2024-01-01", true, "[Linux]");
    write_post(dir.path(), "b.md", "march", "2024-03-01", true, "[Linux]");
    write_post(dir.path(), "c.md", "february", "2024-02-01", true, "[Linux]");

    let repo = load_repo(dir.path()).await;
    let listing = repo.list_published().expect("listing");
    assert_eq!(slugs(&listing), ["march", "february", "january"]);

    let system = FilterState {
        category: Category::System,
        ..FilterState::default()
    };
    assert_eq!(filter_posts(&listing, &system).len(), 3);

    let web = FilterState {
        category: Category::Web,
        ..FilterState::default()
    };
    assert!(filter_posts(&listing, &web).is_empty());

    assert_eq!(filter_posts(&listing, &FilterState::default()), listing);
}

#[tokio::test]
async fn unpublished_and_malformed_documents_never_surface() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_post(dir.path(), "1.md", "visible", "2024-01-01", true, "[React]");
    write_post(dir.path(), "2.md", "hidden", "2024-05-01", false, "[React]");
    fs::write(dir.path().join("3.md"), "---\ntitle: [unclosed\n---\nbody\n").expect("write");
    fs::write(dir.path().join("4.md"), "no frontmatter at all\n").expect("write");

    let loader = ContentLoader::new(dir.path(), Arc::new(ComrakRenderService::default()));
    let report = loader.load().await.expect("content loads");
    assert_eq!(report.diagnostics.len(), 2);
    assert!(report.diagnostics[0].path.ends_with("3.md"));
    assert!(report.diagnostics[1].path.ends_with("4.md"));

    let blog = BlogService::new(Arc::new(InMemoryPostsRepo::new(report.posts)));
    let listing = blog.list_published().expect("listing");
    assert_eq!(slugs(&listing), ["visible"]);
    assert!(blog.get_by_slug("hidden").expect("lookup").is_none());
    assert!(blog.get_by_slug("nonexistent").expect("lookup").is_none());

    let visible = blog
        .get_by_slug("visible")
        .expect("lookup")
        .expect("published post");
    assert!(visible.content.contains("<h1 id=\"visible\">visible</h1>"));
    assert!(visible.content.contains("<p>Body of visible.</p>"));
}

#[tokio::test]
async fn equal_dates_keep_discovery_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_post(dir.path(), "a.md", "alpha", "2024-04-01", true, "[DevOps]");
    write_post(dir.path(), "b.md", "bravo", "2024-04-01", true, "[DevOps, Linux]");
    write_post(dir.path(), "c.md", "charlie", "2024-04-01", true, "[Linux]");

    let repo = load_repo(dir.path()).await;
    let listing = repo.list_published().expect("listing");
    assert_eq!(slugs(&listing), ["alpha", "bravo", "charlie"]);

    let groups = group_by_tag(&listing);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].tag, "DevOps");
    assert_eq!(slugs(&groups[0].posts), ["alpha", "bravo"]);
    assert_eq!(slugs(&groups[1].posts), ["bravo", "charlie"]);
}

#[tokio::test]
async fn shared_query_round_trips_through_listing() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_post(dir.path(), "a.md", "perf-graphql", "2024-01-01", true, "[GraphQL, React]");
    write_post(dir.path(), "b.md", "perf-react", "2024-01-02", true, "[React]");

    let repo = load_repo(dir.path()).await;
    let listing = repo.list_published().expect("listing");

    let state = FilterState {
        category: Category::Web,
        tags: ["graphql".to_string(), "react".to_string()].into(),
        query: "perf".to_string(),
        sort: SortOrder::TitleAz,
    };
    let query = serialize_query(&state);
    assert_eq!(parse_query(&query), state);
    assert_eq!(slugs(&filter_posts(&listing, &parse_query(&query))), ["perf-graphql"]);
}
