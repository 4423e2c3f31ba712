use clap::{Arg, Command};
use rplidar_data::ScanConfig;
use rplidar_driver::{process_frames, run_capture, CaptureEvent};

fn get_port_name() -> String {
    let matches = Command::new("Room scanner capture.")
        .about("Captures one scanning cycle and prints the filtered point cloud as JSON.")
        .disable_version_flag(true)
        .arg(
            Arg::new("port")
                .help("The device path to a serial port")
                .use_value_delimiter(false)
                .required(true),
        )
        .get_matches();

    let port_name: &String = matches.get_one("port").unwrap();
    port_name.to_string()
}

fn main() {
    let port_name = get_port_name();
    let config = ScanConfig::default();

    let (capture_threads, event_rx) = run_capture(&port_name, config.clone()).unwrap();

    let mut frames = Vec::new();
    loop {
        match event_rx.recv() {
            Ok(CaptureEvent::Frame(frame)) => {
                eprintln!("frame {} ({} bytes)", frame.index, frame.frame.len());
                frames.push(frame);
            }
            Ok(CaptureEvent::SessionComplete) | Err(_) => break,
        }
    }
    drop(capture_threads);

    let summary = process_frames(&frames, &config).unwrap();
    eprintln!(
        "{} points ({} records rejected, {} outliers removed)",
        summary.points.len(),
        summary.n_rejected,
        summary.n_outliers
    );

    let rounded: Vec<_> = summary.points.iter().map(|p| p.rounded()).collect();
    println!("{}", serde_json::to_string(&rounded).unwrap());
}
