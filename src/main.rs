use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    easel::logging::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 500.0])
            .with_min_inner_size([480.0, 380.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Easel",
        native_options,
        Box::new(|_cc| Box::new(easel::app::PaintApp::default())),
    )
}
