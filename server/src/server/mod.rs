mod server;
pub use server::Server;

mod server_config;
pub use server_config::ServerConfig;

mod frame_buffer;
pub(crate) use frame_buffer::FrameBuffer;
