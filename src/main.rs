use clap::{App, Arg, ArgMatches};
use image::png::PNGEncoder;
use image::ColorType;
use log::info;
use mandelbrot::Configuration;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const CONFIG: &str = "config";
const IMAGE: &str = "image";
const PARALLELISM: &str = "parallelism";

fn args<'a>() -> ArgMatches<'a> {
    let max_parallelism = num_cpus::get();

    App::new("mandelbrot")
        .version("0.1.0")
        .about("Grayscale Mandelbrot PNG renderer")
        .arg(
            Arg::with_name(CONFIG)
                .required(false)
                .long(CONFIG)
                .short("c")
                .takes_value(true)
                .help("Optional YAML configuration file; built-in defaults apply when absent"),
        )
        .arg(
            Arg::with_name(IMAGE)
                .required(false)
                .long(IMAGE)
                .short("o")
                .takes_value(true)
                .default_value("mandelbrot.png")
                .help("Name to use for the output image file"),
        )
        .arg(
            Arg::with_name(PARALLELISM)
                .required(false)
                .long(PARALLELISM)
                .short("p")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_parallelism,
                        "Could not parse parallelism",
                        &format!("Parallelism must be between 1 and {}", max_parallelism),
                    )
                })
                .help("Overrides the configured number of worker threads"),
        )
        .get_matches()
}

fn write_image(
    outfile: &str,
    pixels: &[u8],
    width: usize,
    height: usize,
) -> Result<(), std::io::Error> {
    let output = File::create(Path::new(outfile))?;
    let encoder = PNGEncoder::new(output);
    encoder.encode(pixels, width as u32, height as u32, ColorType::RGBA(8))?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = args();

    let mut configuration = match matches.value_of(CONFIG) {
        Some(path) => match mandelbrot::parse_configuration(path) {
            Ok(configuration) => configuration,
            Err(e) => {
                eprintln!("Failed to parse configuration file '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => Configuration::default(),
    };
    if let Some(parallelism) = matches.value_of(PARALLELISM) {
        configuration.mandelbrot.parallelism =
            usize::from_str(parallelism).expect("Could not parse parallelism.");
    }

    let outfile = matches.value_of(IMAGE).unwrap();

    let start = Instant::now();
    let pixels = match mandelbrot::render(&configuration) {
        Ok(pixels) => pixels,
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
    };
    let render_duration = start.elapsed();

    if let Err(e) = write_image(
        outfile,
        &pixels,
        configuration.image.canvas_width,
        configuration.image.canvas_height,
    ) {
        eprintln!("Failed to write PNG file '{}': {}", outfile, e);
        std::process::exit(1);
    }

    info!(
        "Created Mandelbrot image file '{}' with resolution '{} x {}' and parallelism of {} in {:?}",
        outfile,
        configuration.image.canvas_width,
        configuration.image.canvas_height,
        configuration.mandelbrot.parallelism,
        render_duration
    );
}
