#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod context;
mod helpers;
mod modules;
mod theme;

use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result {
    init_tracing();

    let icon = load_icon();

    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title("StillKit")
            .with_inner_size([1040.0, 720.0])
            .with_min_inner_size([780.0, 560.0])
            .with_resizable(true)
            .with_icon(icon),
        ..Default::default()
    };

    eframe::run_native(
        "StillKit",
        native_options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(app::StillKitApp::new(cc)))
        }),
    )
}

/// `RUST_LOG` controls verbosity; `info` is the default.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

fn load_icon() -> egui::IconData {
    let bytes = include_bytes!("../../../assets/icon-256.png");
    let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    let mut reader = decoder.read_info().expect("Failed to read icon PNG info");
    let mut buf = vec![0u8; reader.output_buffer_size().expect("Failed to get icon buffer size")];
    let info = reader.next_frame(&mut buf).expect("Failed to decode icon PNG");
    let rgba = match info.color_type {
        png::ColorType::Rgba => buf[..info.buffer_size()].to_vec(),
        png::ColorType::Rgb => buf[..info.buffer_size()]
            .chunks(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        _ => panic!("Unsupported icon color type"),
    };
    egui::IconData {
        rgba,
        width:  info.width,
        height: info.height,
    }
}
