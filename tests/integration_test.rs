use course_catalog::config::CatalogConfig;
use course_catalog::lifecycle::CatalogSystem;
use course_catalog::links::rel;
use course_catalog::model::Course;
use serde_json::json;

fn spring_course() -> Course {
    Course::new(
        "Rapid Spring Boot Application Development",
        "Spring",
        4,
        "Spring Boot gives all the power of the Spring Framework without all of the complexities",
    )
}

/// Full end-to-end walk through create, read, update and delete with links.
#[tokio::test]
async fn test_course_lifecycle_with_links() {
    let system = CatalogSystem::new(&CatalogConfig::default());
    let catalog = &system.catalog;

    // Create: the store assigns id 1
    let created = catalog.create_course(spring_course()).await;
    assert_eq!(created.status(), 201);
    let created = created.into_body().expect("created body");
    assert_eq!(created.course.id, Some(1));

    // Read: same fields, id 1, every item link in order
    let fetched = catalog
        .get_course_by_id(1)
        .await
        .into_body()
        .expect("course 1 should exist");
    assert_eq!(fetched.course, Course { id: Some(1), ..spring_course() });
    assert_eq!(
        fetched.links.rels().collect::<Vec<_>>(),
        [rel::SELF, rel::BY_CATEGORY, rel::CREATE, rel::UPDATE, rel::DELETE, rel::DELETE_ALL]
    );
    assert_eq!(fetched.links.get(rel::SELF).unwrap().href, "/courses/1");
    assert_eq!(
        fetched.links.get(rel::BY_CATEGORY).unwrap().href,
        "/courses/category/Spring"
    );

    // Update: rating changes, id stays
    let updated = catalog
        .update_course(1, Course { rating: 5, ..spring_course() })
        .await;
    assert_eq!(updated.status(), 200);
    let after_update = catalog.get_course_by_id(1).await.into_body().unwrap();
    assert_eq!(after_update.course.rating, 5);
    assert_eq!(after_update.course.id, Some(1));

    // Delete: gone from id lookup and from the category search, twice over
    for _ in 0..2 {
        let deleted = catalog.delete_course_by_id(1).await;
        assert_eq!(deleted.status(), 200);
        assert_eq!(deleted.body().unwrap().message, "Course with id 1 deleted!");
    }
    assert_eq!(catalog.get_course_by_id(1).await.status(), 404);
    let spring = catalog.get_courses_by_category("Spring").await.into_body().unwrap();
    assert!(spring.courses.iter().all(|rep| rep.course.id != Some(1)));

    system.shutdown().await.expect("Failed to shutdown catalog");
}

/// Category search ignores case and returns each matching course exactly once.
#[tokio::test]
async fn test_category_search_is_consistent() {
    let system = CatalogSystem::new(&CatalogConfig::default());
    let service = &system.service;

    for (title, category) in [
        ("Boot", "Spring"),
        ("Ownership", "Rust"),
        ("Data", "spring"),
        ("Security", "SPRING "),
    ] {
        service
            .create_course(Course::new(title, category, 3, ""))
            .await
            .unwrap();
    }
    // Moving a course to another category takes it out of the old bucket
    service
        .update_course(1, Course::new("Boot", "Rust", 3, ""))
        .await
        .unwrap();

    let spring = service.get_courses_by_category("Spring").await.unwrap();
    let titles: Vec<_> = spring.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["Data", "Security"]);

    let rust = service.get_courses_by_category("rust").await.unwrap();
    let ids: Vec<_> = rust.iter().map(|c| c.id.unwrap()).collect();
    assert_eq!(ids, [2, 1]);

    assert!(service.get_courses_by_category("Haskell").await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

/// Validation failures never write anything.
#[tokio::test]
async fn test_rejected_input_leaves_catalog_untouched() {
    let system = CatalogSystem::new(&CatalogConfig::default());
    let catalog = &system.catalog;

    let untitled = catalog.create_course(Course::new("", "Spring", 3, "")).await;
    assert_eq!(untitled.status(), 400);
    let overrated = catalog.create_course(Course::new("Boot", "Spring", 9, "")).await;
    assert_eq!(overrated.status(), 400);

    catalog.create_course(spring_course()).await;
    let blank_update = catalog.update_course(1, Course::new("Boot", "", 3, "")).await;
    assert_eq!(blank_update.status(), 400);

    let all = catalog.get_courses().await.into_body().unwrap();
    assert_eq!(all.courses.len(), 1);
    assert_eq!(all.courses[0].course.category, "Spring");

    system.shutdown().await.unwrap();
}

/// Collection payloads carry per-course links plus create/delete-all for the list.
#[tokio::test]
async fn test_collection_payload_shape() {
    let config = CatalogConfig {
        base_path: "/api/courses".into(),
        ..CatalogConfig::default()
    };
    let system = CatalogSystem::new(&config);
    let catalog = &system.catalog;

    catalog
        .create_course(Course::new("Boot", "Web Dev", 4, "intro"))
        .await;

    let json = catalog.get_courses().await.to_json().unwrap();
    assert_eq!(
        json["links"],
        json!({
            "create": { "href": "/api/courses/", "method": "POST" },
            "delete-all": { "href": "/api/courses/", "method": "DELETE" }
        })
    );
    let first = &json["courses"][0];
    assert_eq!(first["id"], json!(1));
    assert_eq!(first["description"], json!("intro"));
    assert_eq!(
        first["links"]["by-category"],
        json!({ "href": "/api/courses/category/Web%20Dev", "method": "GET" })
    );
    assert_eq!(
        first["links"]["update"],
        json!({ "href": "/api/courses/1", "method": "PUT" })
    );

    let cleared = catalog.delete_courses().await;
    assert_eq!(cleared.body().unwrap().message, "All courses deleted!");
    assert!(catalog.get_courses().await.into_body().unwrap().courses.is_empty());

    system.shutdown().await.unwrap();
}
