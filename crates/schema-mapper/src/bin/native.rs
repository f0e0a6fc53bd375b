#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    schema_mapper::native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web build starts through `schema_mapper::web::start`.
}
