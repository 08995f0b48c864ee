// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Configuration of a single Mandelbrot render: the iteration
//! parameters (escape threshold, iteration budget, parallelism) and
//! the image parameters (viewport rectangle on the complex plane plus
//! canvas dimensions in pixels).  Loaded from a YAML file, or taken
//! from the built-in defaults.

use failure::{Error, Fail};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// Width in pixels of an 8K canvas.
pub const PIXEL_WIDTH_8K: usize = 7680;
/// Height in pixels of an 8K canvas.
pub const PIXEL_HEIGHT_8K: usize = 4320;

/// Width in pixels of a 4K canvas.
pub const PIXEL_WIDTH_4K: usize = 3840;
/// Height in pixels of a 4K canvas.
pub const PIXEL_HEIGHT_4K: usize = 2160;

/// Width in pixels of a QHD canvas.
pub const PIXEL_WIDTH_QHD: usize = 2560;
/// Height in pixels of a QHD canvas.
pub const PIXEL_HEIGHT_QHD: usize = 1440;

/// Width in pixels of an FHD canvas.
pub const PIXEL_WIDTH_FHD: usize = 1920;
/// Height in pixels of an FHD canvas.
pub const PIXEL_HEIGHT_FHD: usize = 1080;

/// The error returned when a configuration fails validation.  Carries
/// the name of the offending field as it appears in the YAML file.
#[derive(Debug, Fail, PartialEq)]
#[fail(display = "invalid configuration: {}", field)]
pub struct InvalidConfiguration {
    /// YAML name of the field that failed validation.
    pub field: &'static str,
}

/// The parameters of the Mandelbrot iteration itself, independent of
/// any image geometry.  Immutable once constructed.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MandelbrotParameters {
    /// Threshold against which |a+b| is compared to decide that an
    /// orbit has escaped.  Must be positive.
    pub escape_threshold: f64,
    /// Number of iterations after which a non-escaping point is
    /// declared a member of the set.  Must be positive.
    pub max_iterations: usize,
    /// Number of column bands, and therefore worker threads, the
    /// canvas is split into.  Must be at least 1; divides the work
    /// evenly only when it divides the canvas width evenly.
    pub parallelism: usize,
}

/// The viewport rectangle on the complex plane and the pixel
/// dimensions of the canvas it is mapped onto.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageParameters {
    /// Left edge of the viewport (real axis).
    pub x_coordinate_min: f64,
    /// Right edge of the viewport (real axis).
    pub x_coordinate_max: f64,
    /// Top edge of the viewport (imaginary axis).
    pub y_coordinate_min: f64,
    /// Bottom edge of the viewport (imaginary axis).
    pub y_coordinate_max: f64,
    /// Canvas width in pixels.  Must be at least 2, since the
    /// coordinate mapper interpolates over `width - 1`.
    pub canvas_width: usize,
    /// Canvas height in pixels.  Must be at least 2.
    pub canvas_height: usize,
}

/// A complete render configuration, the only input the renderer takes.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Iteration parameters.
    pub mandelbrot: MandelbrotParameters,
    /// Viewport and canvas parameters.
    pub image: ImageParameters,
}

impl Default for Configuration {
    /// The full-view QHD render: the classic Mandelbrot viewport at
    /// 2560x1440 with a hundred iterations across sixteen bands.
    fn default() -> Self {
        Configuration {
            mandelbrot: MandelbrotParameters {
                escape_threshold: 4.0,
                max_iterations: 100,
                parallelism: 16,
            },
            image: ImageParameters {
                x_coordinate_min: -2.25,
                x_coordinate_max: 0.75,
                y_coordinate_min: -1.1,
                y_coordinate_max: 1.1,
                canvas_width: PIXEL_WIDTH_QHD,
                canvas_height: PIXEL_HEIGHT_QHD,
            },
        }
    }
}

impl Configuration {
    /// Checks every field the renderer depends on, returning the
    /// first offense found.  The renderer calls this before touching
    /// a single pixel, so a bad configuration never produces a
    /// partially rendered buffer.
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        if !(self.mandelbrot.escape_threshold > 0.0) {
            return Err(InvalidConfiguration {
                field: "escapeThreshold",
            });
        }
        if self.mandelbrot.max_iterations == 0 {
            return Err(InvalidConfiguration {
                field: "maxIterations",
            });
        }
        if self.mandelbrot.parallelism == 0 {
            return Err(InvalidConfiguration {
                field: "parallelism",
            });
        }
        if self.image.canvas_width < 2 {
            return Err(InvalidConfiguration {
                field: "canvasWidth",
            });
        }
        if self.image.canvas_height < 2 {
            return Err(InvalidConfiguration {
                field: "canvasHeight",
            });
        }
        if !(self.image.x_coordinate_min < self.image.x_coordinate_max) {
            return Err(InvalidConfiguration {
                field: "xCoordinateMin",
            });
        }
        if !(self.image.y_coordinate_min < self.image.y_coordinate_max) {
            return Err(InvalidConfiguration {
                field: "yCoordinateMin",
            });
        }
        Ok(())
    }
}

/// Reads and deserializes a YAML configuration file.  The field names
/// in the file are the camelCase names documented on the structs
/// above.  No validation happens here; the renderer validates.
pub fn parse_configuration<P: AsRef<Path>>(path: P) -> Result<Configuration, Error> {
    let file = File::open(path)?;
    let configuration = serde_yaml::from_reader(file)?;
    Ok(configuration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn valid() -> Configuration {
        Configuration::default()
    }

    #[test]
    fn default_configuration_is_valid() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn rejects_zero_parallelism() {
        let mut config = valid();
        config.mandelbrot.parallelism = 0;
        assert_eq!(
            config.validate(),
            Err(InvalidConfiguration {
                field: "parallelism"
            })
        );
    }

    #[test]
    fn rejects_zero_max_iterations() {
        let mut config = valid();
        config.mandelbrot.max_iterations = 0;
        assert_eq!(
            config.validate(),
            Err(InvalidConfiguration {
                field: "maxIterations"
            })
        );
    }

    #[test]
    fn rejects_non_positive_escape_threshold() {
        let mut config = valid();
        config.mandelbrot.escape_threshold = 0.0;
        assert_eq!(
            config.validate(),
            Err(InvalidConfiguration {
                field: "escapeThreshold"
            })
        );
        config.mandelbrot.escape_threshold = -4.0;
        assert!(config.validate().is_err());
        config.mandelbrot.escape_threshold = std::f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_degenerate_canvas() {
        let mut config = valid();
        config.image.canvas_width = 0;
        assert_eq!(
            config.validate(),
            Err(InvalidConfiguration {
                field: "canvasWidth"
            })
        );
        let mut config = valid();
        config.image.canvas_height = 1;
        assert_eq!(
            config.validate(),
            Err(InvalidConfiguration {
                field: "canvasHeight"
            })
        );
    }

    #[test]
    fn rejects_inverted_viewport() {
        let mut config = valid();
        config.image.x_coordinate_min = config.image.x_coordinate_max;
        assert_eq!(
            config.validate(),
            Err(InvalidConfiguration {
                field: "xCoordinateMin"
            })
        );
        let mut config = valid();
        config.image.y_coordinate_min = 2.0;
        assert_eq!(
            config.validate(),
            Err(InvalidConfiguration {
                field: "yCoordinateMin"
            })
        );
    }

    #[test]
    fn parse_missing_file_is_an_error() {
        assert!(parse_configuration("no-such-config.yaml").is_err());
    }

    #[test]
    fn parse_rejects_non_yaml_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "this is not yaml").unwrap();
        assert!(parse_configuration(&path).is_err());
    }

    #[test]
    fn parse_reads_camel_case_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let yaml = "
mandelbrot:
  escapeThreshold: 4.0
  maxIterations: 20
  parallelism: 4
image:
  xCoordinateMin: -2.25
  xCoordinateMax: 0.75
  yCoordinateMin: -1.2
  yCoordinateMax: 1.2
  canvasWidth: 1920
  canvasHeight: 1080
";
        fs::write(&path, yaml).unwrap();
        let configuration = parse_configuration(&path).unwrap();
        assert_eq!(
            configuration,
            Configuration {
                mandelbrot: MandelbrotParameters {
                    escape_threshold: 4.0,
                    max_iterations: 20,
                    parallelism: 4,
                },
                image: ImageParameters {
                    x_coordinate_min: -2.25,
                    x_coordinate_max: 0.75,
                    y_coordinate_min: -1.2,
                    y_coordinate_max: 1.2,
                    canvas_width: PIXEL_WIDTH_FHD,
                    canvas_height: PIXEL_HEIGHT_FHD,
                },
            }
        );
    }
}
