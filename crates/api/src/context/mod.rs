//! Application context - dependency injection container

use std::sync::Arc;

use schedulr_core::{
    AvailabilityRepository as AvailabilityRepositoryPort, AvailabilityService, BookingCommitter,
    BookingNotifier as BookingNotifierPort, BookingRepository as BookingRepositoryPort,
    BookingService, Clock, EventTypeRepository as EventTypeRepositoryPort, EventTypeService,
    HostRepository as HostRepositoryPort, HostService,
    MeetingLinkProvisioner as MeetingLinkProvisionerPort, PostCommitDispatcher, SlotEngine,
    SystemClock,
};
use schedulr_domain::{Config, Result, SchedulrError};
use schedulr_infra::{
    config, DbManager, GeneratedMeetingLinkProvisioner, LoggingNotifier,
    SqliteAvailabilityRepository, SqliteBookingRepository, SqliteEventTypeRepository,
    SqliteHostRepository,
};
use tokio::task;
use tracing::info;

/// Type alias for host repository port trait object
type DynHostRepositoryPort = dyn HostRepositoryPort;

/// Type alias for availability repository port trait object
type DynAvailabilityRepositoryPort = dyn AvailabilityRepositoryPort;

/// Type alias for event type repository port trait object
type DynEventTypeRepositoryPort = dyn EventTypeRepositoryPort;

/// Type alias for booking repository port trait object
type DynBookingRepositoryPort = dyn BookingRepositoryPort;

/// Post-commit collaborators, replaceable in tests
pub struct Hooks {
    pub notifier: Arc<dyn BookingNotifierPort>,
    pub provisioner: Arc<dyn MeetingLinkProvisionerPort>,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            notifier: Arc::new(LoggingNotifier),
            provisioner: Arc::new(GeneratedMeetingLinkProvisioner),
        }
    }
}

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub clock: Arc<dyn Clock>,

    // Storage ports
    pub host_repository: Arc<DynHostRepositoryPort>,
    pub availability_repository: Arc<DynAvailabilityRepositoryPort>,
    pub event_type_repository: Arc<DynEventTypeRepositoryPort>,
    pub booking_repository: Arc<DynBookingRepositoryPort>,

    // Services
    pub hosts: Arc<HostService>,
    pub availability: Arc<AvailabilityService>,
    pub event_types: Arc<EventTypeService>,
    pub slot_engine: Arc<SlotEngine>,
    pub committer: Arc<BookingCommitter>,
    pub bookings: Arc<BookingService>,
}

impl AppContext {
    /// Load `.env`, then configuration from the environment or a config file,
    /// and build the context.
    ///
    /// # Errors
    /// `Config` for missing or invalid configuration, `Database` if the
    /// database cannot be opened or migrated.
    pub async fn new() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => info!(path = %path.display(), "Loaded .env"),
            Err(err) => tracing::debug!(error = %err, "No .env file loaded"),
        }

        let config = config::load()?;
        Self::new_with_config(config).await
    }

    /// Build the context from an explicit configuration.
    ///
    /// # Errors
    /// As [`Self::new`], minus the configuration loading.
    pub async fn new_with_config(config: Config) -> Result<Self> {
        Self::assemble(config, Arc::new(SystemClock), Hooks::default()).await
    }

    /// Build the context with a custom clock and post-commit hooks.
    ///
    /// # Errors
    /// As [`Self::new_with_config`].
    pub async fn assemble(config: Config, clock: Arc<dyn Clock>, hooks: Hooks) -> Result<Self> {
        config.validate()?;

        let db = Arc::new(DbManager::from_config(&config.database)?);
        let migrations_db = Arc::clone(&db);
        task::spawn_blocking(move || migrations_db.run_migrations())
            .await
            .map_err(|err| SchedulrError::Internal(format!("migration task failed: {err}")))??;

        let host_repository: Arc<DynHostRepositoryPort> =
            Arc::new(SqliteHostRepository::new(Arc::clone(&db)));
        let availability_repository: Arc<DynAvailabilityRepositoryPort> =
            Arc::new(SqliteAvailabilityRepository::new(Arc::clone(&db)));
        let event_type_repository: Arc<DynEventTypeRepositoryPort> =
            Arc::new(SqliteEventTypeRepository::new(Arc::clone(&db)));
        let booking_repository: Arc<DynBookingRepositoryPort> =
            Arc::new(SqliteBookingRepository::new(Arc::clone(&db)));

        let dispatcher = Arc::new(PostCommitDispatcher::new(
            booking_repository.clone(),
            hooks.notifier,
            hooks.provisioner,
        ));

        let hosts = Arc::new(HostService::new(
            host_repository.clone(),
            Arc::clone(&clock),
            config.scheduling.default_timezone.clone(),
        ));
        let availability = Arc::new(AvailabilityService::new(availability_repository.clone()));
        let event_types = Arc::new(EventTypeService::new(
            event_type_repository.clone(),
            host_repository.clone(),
            Arc::clone(&clock),
        ));
        let slot_engine = Arc::new(SlotEngine::new(
            host_repository.clone(),
            event_type_repository.clone(),
            availability_repository.clone(),
            booking_repository.clone(),
            Arc::clone(&clock),
            config.scheduling.clone(),
        ));
        let committer = Arc::new(BookingCommitter::new(
            host_repository.clone(),
            booking_repository.clone(),
            Arc::clone(&slot_engine),
            Arc::clone(&dispatcher),
            Arc::clone(&clock),
        ));
        let bookings = Arc::new(BookingService::new(
            booking_repository.clone(),
            host_repository.clone(),
            dispatcher,
            Arc::clone(&clock),
            config.scheduling.upcoming_window_days,
        ));

        info!(
            db_path = %db.path().display(),
            max_range_days = config.scheduling.max_range_days,
            horizon_days = config.scheduling.horizon_days,
            "Application context initialised"
        );

        Ok(Self {
            config,
            db,
            clock,
            host_repository,
            availability_repository,
            event_type_repository,
            booking_repository,
            hosts,
            availability,
            event_types,
            slot_engine,
            committer,
            bookings,
        })
    }
}
