//! Throwaway local PostgreSQL instances.
//!
//! `LocalDbManager` drives `initdb`, `pg_ctl`, and `pg_isready` to run a
//! private PostgreSQL server in a temporary directory. Integration tests use
//! it to exercise the real schema without an externally managed database.

use std::net::TcpListener;
use std::path::PathBuf;
use std::time::Duration;

use sqlx::postgres::PgPool;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::sleep;
use tracing::{info, warn};

/// Database created inside the local instance.
const DEFAULT_DATABASE: &str = "parley";

/// Maximum time to wait for PostgreSQL to become ready.
const PG_READY_TIMEOUT: Duration = Duration::from_secs(30);

/// Poll interval when waiting for PostgreSQL readiness.
const PG_READY_POLL: Duration = Duration::from_millis(200);

/// Errors that can occur while managing a local instance.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("PostgreSQL command failed: {0}")]
    Command(String),

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pg_config not found on PATH")]
    PgConfigNotFound,

    #[error("PostgreSQL not ready after {0:?}")]
    ReadyTimeout(Duration),
}

/// Result type for local database operations.
pub type Result<T> = std::result::Result<T, DbError>;

/// Manages a private PostgreSQL server with temporary storage.
///
/// The data directory is removed when the manager is dropped; a server still
/// running at that point is stopped first.
pub struct LocalDbManager {
    bin_dir: PathBuf,
    data_dir: PathBuf,
    port: u16,
    database_name: String,
    started: bool,
    _tempdir: tempfile::TempDir,
}

impl LocalDbManager {
    /// Creates a manager backed by a fresh temporary directory.
    ///
    /// PostgreSQL binaries are located via `pg_config --bindir`; callers can
    /// match on [`DbError::PgConfigNotFound`] to skip when none are installed.
    pub async fn ephemeral() -> Result<Self> {
        let bin_dir = discover_bin_dir().await?;
        let tempdir = tempfile::tempdir()?;
        let data_dir = tempdir.path().join("pgdata");

        Ok(Self {
            bin_dir,
            data_dir,
            port: 0,
            database_name: DEFAULT_DATABASE.to_string(),
            started: false,
            _tempdir: tempdir,
        })
    }

    /// Initializes the data directory. Skips if it already exists.
    pub async fn setup(&mut self) -> Result<()> {
        if self.data_dir.join("PG_VERSION").exists() {
            return Ok(());
        }

        info!(data_dir = %self.data_dir.display(), "initializing PostgreSQL data directory");
        let output = Command::new(self.bin_dir.join("initdb"))
            .arg("-D")
            .arg(&self.data_dir)
            .arg("--no-locale")
            .arg("--encoding=UTF8")
            .arg("--auth=trust")
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DbError::Command(format!("initdb failed: {stderr}")));
        }
        Ok(())
    }

    /// Starts the server on a free port and creates the application database.
    pub async fn start(&mut self) -> Result<()> {
        if self.port == 0 {
            self.port = find_free_port()?;
        }

        let port_opt = format!(
            "-p {} -k {} -h localhost",
            self.port,
            self.data_dir.display()
        );
        let output = Command::new(self.bin_dir.join("pg_ctl"))
            .arg("-D")
            .arg(&self.data_dir)
            .arg("-o")
            .arg(&port_opt)
            .arg("-l")
            .arg(self.data_dir.join("postgresql.log"))
            .arg("start")
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DbError::Command(format!("pg_ctl start failed: {stderr}")));
        }

        self.wait_for_ready().await?;
        self.started = true;
        self.create_database_if_missing().await?;

        info!(port = self.port, url = %self.connection_url(), "local PostgreSQL ready");
        Ok(())
    }

    /// Stops the server gracefully.
    pub async fn stop(&mut self) -> Result<()> {
        if !self.started {
            return Ok(());
        }

        let output = Command::new(self.bin_dir.join("pg_ctl"))
            .arg("-D")
            .arg(&self.data_dir)
            .arg("-m")
            .arg("fast")
            .arg("stop")
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DbError::Command(format!("pg_ctl stop failed: {stderr}")));
        }

        self.started = false;
        Ok(())
    }

    /// Connection URL for the application database.
    pub fn connection_url(&self) -> String {
        format!(
            "postgresql://localhost:{}/{}",
            self.port, self.database_name
        )
    }

    async fn wait_for_ready(&self) -> Result<()> {
        let pg_isready = self.bin_dir.join("pg_isready");
        let deadline = tokio::time::Instant::now() + PG_READY_TIMEOUT;

        loop {
            let output = Command::new(&pg_isready)
                .arg("-p")
                .arg(self.port.to_string())
                .arg("-h")
                .arg("localhost")
                .output()
                .await?;

            if output.status.success() {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(DbError::ReadyTimeout(PG_READY_TIMEOUT));
            }
            sleep(PG_READY_POLL).await;
        }
    }

    async fn create_database_if_missing(&self) -> Result<()> {
        let maintenance_url = format!("postgresql://localhost:{}/postgres", self.port);
        let pool = PgPool::connect(&maintenance_url).await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
                .bind(&self.database_name)
                .fetch_one(&pool)
                .await?;

        if !exists {
            // CREATE DATABASE cannot use bind parameters
            let sql = format!("CREATE DATABASE \"{}\"", self.database_name);
            sqlx::query(&sql).execute(&pool).await?;
        }

        pool.close().await;
        Ok(())
    }
}

impl Drop for LocalDbManager {
    fn drop(&mut self) {
        if !self.started {
            return;
        }
        let status = std::process::Command::new(self.bin_dir.join("pg_ctl"))
            .arg("-D")
            .arg(&self.data_dir)
            .arg("-m")
            .arg("immediate")
            .arg("stop")
            .output();
        if let Err(e) = status {
            warn!("failed to stop local PostgreSQL on drop: {e}");
        }
    }
}

/// Locate the PostgreSQL bin directory via `pg_config`.
async fn discover_bin_dir() -> Result<PathBuf> {
    let output = Command::new("pg_config")
        .arg("--bindir")
        .output()
        .await
        .map_err(|_| DbError::PgConfigNotFound)?;

    if !output.status.success() {
        return Err(DbError::PgConfigNotFound);
    }
    let bin_dir = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(PathBuf::from(bin_dir))
}

/// Find a free ephemeral port by binding to port 0.
fn find_free_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
