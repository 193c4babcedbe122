use sqlx::PgConnection;

/// A borrowed or owned database connection which driven adapters can run queries on.
/// The connection goes back to wherever it came from when the handle is dropped.
pub trait ConnectionHandle {
    fn borrow_connection(&mut self) -> &mut PgConnection;
}

/// Abstraction over the external systems the application talks to. Business logic only ever
/// sees this trait, so the concrete connection source can be swapped out in tests.
pub trait ExternalConnectivity: Sync {
    type DbHandle<'cxn_borrow>: ConnectionHandle
    where
        Self: 'cxn_borrow;

    /// Acquires a database connection scoped to the lifetime of the returned handle
    async fn database_cxn(&mut self) -> Result<Self::DbHandle<'_>, anyhow::Error>;
}
