use oracle::{Connection, Error as OracleError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionInfo {
    pub name: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub host: String,
    pub port: u16,
    pub service_name: String,
    /// Per-call timeout applied to the connection; `None` disables it.
    pub call_timeout_secs: Option<u64>,
}

impl ConnectionInfo {
    pub fn connection_string(&self) -> String {
        format!("//{}:{}/{}", self.host, self.port, self.service_name)
    }

    pub fn display_string(&self) -> String {
        format!(
            "{} ({}@{}:{}/{})",
            self.name, self.username, self.host, self.port, self.service_name
        )
    }

    /// Securely clear the password from memory by overwriting with zeros
    /// then releasing the allocation.
    pub fn clear_password(&mut self) {
        // Overwrite the existing bytes with zeros before dropping
        // SAFETY: we write zeros over the valid UTF-8 bytes (zeros are valid UTF-8)
        let bytes = unsafe { self.password.as_bytes_mut() };
        for b in bytes.iter_mut() {
            // Use write_volatile to prevent the compiler from optimizing away the zeroing
            unsafe { std::ptr::write_volatile(b, 0) };
        }
        self.password.clear();
        self.password.shrink_to_fit();
    }
}

impl Default for ConnectionInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            username: String::new(),
            password: String::new(),
            host: "localhost".to_string(),
            port: 1521,
            service_name: "ORCL".to_string(),
            call_timeout_secs: None,
        }
    }
}

/// Open a connection for one browse request: connect, apply the default
/// session settings, then the optional call timeout.
pub fn connect(info: &ConnectionInfo) -> Result<Connection, OracleError> {
    let conn_str = info.connection_string();
    let connection = match Connection::connect(&info.username, &info.password, &conn_str) {
        Ok(connection) => connection,
        Err(err) => {
            eprintln!("Connection error: {err}");
            return Err(err);
        }
    };

    apply_default_session_settings(&connection);

    if let Some(secs) = info.call_timeout_secs {
        if let Err(err) = connection.set_call_timeout(Some(Duration::from_secs(secs))) {
            eprintln!("Warning: failed to set call timeout: {err}");
        }
    }

    Ok(connection)
}

fn apply_default_session_settings(conn: &Connection) {
    let statements = [
        "ALTER SESSION SET NLS_TIMESTAMP_FORMAT = 'yyyy-mm-dd hh24:mi:ss'",
        "ALTER SESSION SET NLS_DATE_FORMAT = 'yyyy-mm-dd hh24:mi:ss'",
    ];

    for statement in statements {
        if let Err(err) = conn.execute(statement, &[]) {
            eprintln!("Warning: failed to apply default session setting `{statement}`: {err}");
        }
    }
}

/// Connect and immediately drop the connection, to verify the parameters.
pub fn test_connection(info: &ConnectionInfo) -> Result<(), OracleError> {
    let conn_str = info.connection_string();
    match Connection::connect(&info.username, &info.password, &conn_str) {
        Ok(_connection) => {}
        Err(err) => {
            eprintln!("Connection error: {err}");
            return Err(err);
        }
    }
    Ok(())
}
