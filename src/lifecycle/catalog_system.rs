use std::sync::Arc;

use tracing::{error, info};

use crate::config::CatalogConfig;
use crate::course_service::{self, CourseService};
use crate::links::RouteTable;
use crate::response::ResponseAssembler;

/// The runtime orchestrator for the course catalog.
///
/// `CatalogSystem` is responsible for:
/// - **Lifecycle Management**: Starting the store actor and stopping it on shutdown
/// - **Dependency Wiring**: Handing the store to the service and the service to the assembler
/// - **Route Table**: Building the route table once from configuration
///
/// # Example
///
/// ```ignore
/// let system = CatalogSystem::new(&CatalogConfig::default());
///
/// let reply = system.catalog.create_course(course).await;
/// let reply = system.catalog.get_course_by_id(1).await;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem {
    /// Adapter-facing entry point producing payloads with links
    pub catalog: ResponseAssembler,

    /// Direct access to the service, for adapters that render their own payloads
    pub service: Arc<CourseService>,

    /// The process-wide route table
    pub routes: Arc<RouteTable>,

    /// Task handle of the store actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl CatalogSystem {
    /// Creates and initializes a new `CatalogSystem` with the store running.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &CatalogConfig) -> Self {
        let (store_actor, store) = course_service::new_store(config.store_buffer);
        let handle = tokio::spawn(store_actor.run());

        let routes = Arc::new(RouteTable::course_routes(&config.base_path));
        let service = Arc::new(CourseService::new(store));
        let catalog = ResponseAssembler::new(service.clone(), routes.clone());

        info!(base_path = %config.base_path, routes = routes.len(), "Catalog started");

        Self {
            catalog,
            service,
            routes,
            handle,
        }
    }

    /// Gracefully shuts down the catalog.
    ///
    /// Dropping the service closes the store's channel once no other clones of
    /// the catalog or service are alive; the actor then drains its queue and
    /// exits. Callers must drop any clones they took before awaiting this.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down catalog...");

        drop(self.catalog);
        drop(self.service);

        if let Err(e) = self.handle.await {
            error!("Store task failed: {:?}", e);
            return Err(format!("Store task failed: {:?}", e));
        }

        info!("Catalog shutdown complete.");
        Ok(())
    }
}
