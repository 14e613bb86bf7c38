pub async fn readiness() -> &'static str {
    "OK"
}
