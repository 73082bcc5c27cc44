fn main() {
    // Service stubs for the hand-written prost messages in src/grpc.rs.
    // No .proto file, so no protoc is needed at build time.
    let methods = [
        ("purchase_ticket", "PurchaseTicket", "PurchaseRequest", "PurchaseResponse"),
        ("allocate_seat", "AllocateSeat", "AllocateSeatRequest", "AllocateSeatResponse"),
        ("show_receipt", "ShowReceipt", "ShowReceiptRequest", "ShowReceiptResponse"),
        (
            "get_users_by_section",
            "GetUsersBySection",
            "GetUsersBySectionRequest",
            "GetUsersBySectionResponse",
        ),
        ("remove_user", "RemoveUser", "RemoveUserRequest", "RemoveUserResponse"),
        ("modify_seat", "ModifySeat", "ModifySeatRequest", "ModifySeatResponse"),
    ];

    let mut service = tonic_build::manual::Service::builder()
        .name("TicketService")
        .package("ticket");

    for (name, route, input, output) in methods {
        service = service.method(
            tonic_build::manual::Method::builder()
                .name(name)
                .route_name(route)
                .input_type(format!("crate::grpc::{}", input))
                .output_type(format!("crate::grpc::{}", output))
                .codec_path("tonic::codec::ProstCodec")
                .build(),
        );
    }

    tonic_build::manual::Builder::new().compile(&[service.build()]);
}
