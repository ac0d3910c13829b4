//! Demo: walks one course through its whole lifecycle and prints every payload.

use course_catalog::config::CatalogConfig;
use course_catalog::lifecycle::{setup_tracing, CatalogSystem};
use course_catalog::model::Course;
use course_catalog::response::Reply;
use serde::Serialize;
use tracing::{info, Instrument};

fn print<T: Serialize>(label: &str, reply: &Reply<T>) -> Result<(), String> {
    let body = reply.to_json().map_err(|e| e.to_string())?;
    let pretty = serde_json::to_string_pretty(&body).map_err(|e| e.to_string())?;
    println!("--- {label} ({})\n{pretty}", reply.status());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = CatalogConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting course catalog");

    let system = CatalogSystem::new(&config);
    let catalog = system.catalog.clone();

    let span = tracing::info_span!("course_lifecycle");
    async {
        let course = Course::new(
            "Rapid Spring Boot Application Development",
            "Spring",
            4,
            "Spring Boot gives all the power of the Spring Framework without all of the complexities",
        );
        let created = catalog.create_course(course.clone()).await;
        print("create", &created)?;
        let id = created
            .body()
            .and_then(|rep| rep.course.id)
            .ok_or("course was not created")?;

        print("get by id", &catalog.get_course_by_id(id).await)?;

        let rerated = Course { rating: 5, ..course };
        print("update", &catalog.update_course(id, rerated).await)?;
        print("by category", &catalog.get_courses_by_category("spring").await)?;

        print("delete", &catalog.delete_course_by_id(id).await)?;
        print("get deleted", &catalog.get_course_by_id(id).await)?;
        print("all", &catalog.get_courses().await)?;
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    // Shutdown system gracefully
    drop(catalog);
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
