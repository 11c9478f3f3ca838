mod connection;
pub(crate) use connection::ClientConnection;
