use std::future::Future;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;

pub mod error;
pub mod grpc;
pub mod state;
pub mod telemetry;

pub use state::AppState;

use grpc::{TicketServiceHandler, TicketServiceServer};

/// The ticket service, ready to be added to a tonic router
pub fn app(state: AppState) -> TicketServiceServer<TicketServiceHandler> {
    TicketServiceServer::new(TicketServiceHandler::new(state))
}

/// Serve the ticket service on `listener` until `shutdown` resolves, then stop
/// gracefully (in-flight calls are allowed to finish).
pub async fn serve<F>(
    state: AppState,
    listener: TcpListener,
    shutdown: F,
) -> Result<(), tonic::transport::Error>
where
    F: Future<Output = ()> + Send,
{
    tonic::transport::Server::builder()
        .trace_fn(|req| tracing::info_span!("grpc", method = %req.uri().path()))
        .add_service(app(state))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await
}
