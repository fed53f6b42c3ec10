//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Blog;

/// Generate the static site. Every run is a full rebuild.
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let summary = Generator::new(blog).generate()?;

    tracing::info!(
        "Generated {} pages for {} posts in {} categories",
        summary.pages,
        summary.posts,
        summary.categories
    );
    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
