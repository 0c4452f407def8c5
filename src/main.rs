#[tokio::main]
async fn main() {
    cricket_booking_backend::run().await;
}
