//! fractal-noise CLI - evaluate the fractal, distort and cellular nodes from
//! the command line.

use clap::{Args, Parser, Subcommand};
use glam::Vec3;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use fractal_noise::cellular::{
    self, CellularOutput, CellularParams, ClassicCellularOutput, DistanceMetric,
};
use fractal_noise::displace::{distort_point, DistortParams};
use fractal_noise::noise::{FlowParams, LatticeParams, NoiseKind, NoiseQuality};
use fractal_noise::{load_json, FractalShader, KernelSpec};

/// Fractal noise evaluator.
#[derive(Parser)]
#[command(name = "fractal-noise")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct PointArgs {
    /// Point to evaluate at.
    #[arg(
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true,
        default_values_t = vec![0.0, 0.0, 0.0]
    )]
    at: Vec<f32>,
}

impl PointArgs {
    fn point(&self) -> Vec3 {
        Vec3::from_slice(&self.at)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the fractal node at a point or over a grid.
    Fractal {
        #[command(flatten)]
        point: PointArgs,

        /// JSON file with a fractal node parameter block.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Base noise (value, perlin, simplex, flow).
        #[arg(short, long)]
        kernel: Option<NoiseKind>,

        /// Number of octaves.
        #[arg(long)]
        octaves: Option<i32>,

        /// Base frequency.
        #[arg(long)]
        frequency: Option<f32>,

        /// Amplitude decay per octave.
        #[arg(long)]
        persistence: Option<f32>,

        /// Frequency multiplier per octave.
        #[arg(long)]
        lacunarity: Option<f32>,

        /// Seed of the value and Perlin kernels.
        #[arg(short, long)]
        seed: Option<i32>,

        /// Interpolation quality of the value and Perlin kernels.
        #[arg(long)]
        quality: Option<NoiseQuality>,

        /// Flow noise time.
        #[arg(long)]
        time: Option<f32>,

        /// Enable the turbulence modifier.
        #[arg(long)]
        turbulent: bool,

        /// Enable the ridge modifier.
        #[arg(long)]
        ridged: bool,

        /// Do not divide by the persistence sum.
        #[arg(long)]
        no_dampen: bool,

        /// Skip the output remap.
        #[arg(long)]
        raw: bool,

        /// Evaluate an NxN grid on the z = 0 plane instead of one point.
        #[arg(long)]
        grid: Option<u32>,

        /// Half width of the grid.
        #[arg(long, default_value = "1.0")]
        extent: f32,
    },

    /// Displace a point by the distort node.
    Distort {
        #[command(flatten)]
        point: PointArgs,

        /// Base noise (value, perlin, simplex, flow).
        #[arg(short, long, default_value = "simplex")]
        kernel: NoiseKind,

        /// Base frequency.
        #[arg(long, default_value = "1.0")]
        frequency: f32,

        /// Displacement distance.
        #[arg(long, default_value = "1.0")]
        power: f32,

        /// Number of octaves.
        #[arg(long, default_value = "3")]
        roughness: i32,

        /// Seed of the value and Perlin kernels.
        #[arg(short, long, default_value = "0")]
        seed: i32,

        /// Flow noise time.
        #[arg(long, default_value = "0.0")]
        time: f32,
    },

    /// Evaluate the cellular node at a point.
    Cellular {
        #[command(flatten)]
        point: PointArgs,

        /// JSON file with a cellular parameter block.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output formula name.
        #[arg(short, long)]
        mode: Option<String>,

        /// Use the two-nearest output formulas (noise, dist1, ...).
        #[arg(long)]
        classic: bool,

        /// Distance metric (euclidian, manhattan, chebyshev).
        #[arg(long)]
        metric: Option<DistanceMetric>,

        /// Feature point seed.
        #[arg(short, long)]
        seed: Option<i32>,

        /// Scale applied to the input point.
        #[arg(long)]
        frequency: Option<f32>,
    },

    /// List the recognised enumeration names and default parameters.
    Info,
}

#[derive(Serialize)]
struct Sample {
    point: Vec3,
    value: f32,
}

#[derive(Serialize)]
struct VectorSample {
    point: Vec3,
    value: Vec3,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Fractal {
            point,
            config,
            kernel,
            octaves,
            frequency,
            persistence,
            lacunarity,
            seed,
            quality,
            time,
            turbulent,
            ridged,
            no_dampen,
            raw,
            grid,
            extent,
        } => {
            let mut shader: FractalShader = match config {
                Some(path) => load_json(&path).unwrap_or_else(|e| fail(e)),
                None => FractalShader::default(),
            };

            if let Some(kernel) = kernel {
                shader.kernel = kernel;
            }
            if let Some(octaves) = octaves {
                shader.fractal.octaves = octaves;
            }
            if let Some(frequency) = frequency {
                shader.fractal.frequency = frequency;
            }
            if let Some(persistence) = persistence {
                shader.fractal.persistence = persistence;
            }
            if let Some(lacunarity) = lacunarity {
                shader.fractal.lacunarity = lacunarity;
            }
            if let Some(seed) = seed {
                shader.value.seed = seed;
                shader.perlin.seed = seed;
            }
            if let Some(quality) = quality {
                shader.value.quality = quality;
                shader.perlin.quality = quality;
            }
            if let Some(time) = time {
                shader.flow.time = time;
            }
            shader.turbulent |= turbulent;
            shader.ridged |= ridged;
            if no_dampen {
                shader.dampen = false;
            }
            if raw {
                shader.remap = None;
            }

            tracing::debug!(?shader, "fractal parameters");
            run_fractal(&shader, point.point(), grid, extent, cli.json);
        }
        Commands::Distort {
            point,
            kernel,
            frequency,
            power,
            roughness,
            seed,
            time,
        } => {
            let spec = KernelSpec::from_kind(
                kernel,
                LatticeParams::with_seed(seed),
                FlowParams {
                    time,
                    ..Default::default()
                },
            );
            let params = DistortParams {
                frequency,
                power,
                roughness,
            };
            run_distort(point.point(), spec, &params, cli.json);
        }
        Commands::Cellular {
            point,
            config,
            mode,
            classic,
            metric,
            seed,
            frequency,
        } => {
            let mut params: CellularParams = match config {
                Some(path) => load_json(&path).unwrap_or_else(|e| fail(e)),
                None => CellularParams::default(),
            };
            if let Some(metric) = metric {
                params.metric = metric;
            }
            if let Some(seed) = seed {
                params.seed = seed;
            }
            if let Some(frequency) = frequency {
                params.frequency = frequency;
            }
            run_cellular(point.point(), &params, mode, classic, cli.json);
        }
        Commands::Info => run_info(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => fail(e),
    }
}

fn run_fractal(shader: &FractalShader, at: Vec3, grid: Option<u32>, extent: f32, json: bool) {
    let Some(n) = grid else {
        let value = shader.evaluate(at);
        if json {
            print_json(&Sample { point: at, value });
        } else {
            println!("fractal({}, {}, {}) = {}", at.x, at.y, at.z, value);
        }
        return;
    };

    if n == 0 || n > 4096 {
        fail("Grid size must be between 1 and 4096");
    }

    let start = Instant::now();
    let step = if n > 1 { 2.0 * extent / (n - 1) as f32 } else { 0.0 };
    let mut samples = Vec::with_capacity((n * n) as usize);
    for j in 0..n {
        for i in 0..n {
            let point = at + Vec3::new(-extent + i as f32 * step, -extent + j as f32 * step, 0.0);
            samples.push(Sample {
                point,
                value: shader.evaluate(point),
            });
        }
    }
    let elapsed = start.elapsed();

    if json {
        print_json(&samples);
        return;
    }

    let (min, max, sum) = samples.iter().fold(
        (f32::INFINITY, f32::NEG_INFINITY, 0.0f64),
        |(min, max, sum), s| (min.min(s.value), max.max(s.value), sum + s.value as f64),
    );

    println!("Fractal grid");
    println!("============");
    println!("Kernel:   {}", shader.kernel);
    println!("Octaves:  {}", shader.fractal.octaves);
    println!("Samples:  {}x{} over [-{}, {}]", n, n, extent, extent);
    println!();
    println!("Min:      {:.6}", min);
    println!("Max:      {:.6}", max);
    println!("Mean:     {:.6}", sum / samples.len() as f64);
    println!();
    println!(
        "Evaluated in {:.2?} ({:.1} ns/sample)",
        elapsed,
        elapsed.as_nanos() as f64 / samples.len() as f64
    );
}

fn run_distort(at: Vec3, kernel: KernelSpec, params: &DistortParams, json: bool) {
    let value = distort_point(at, kernel, params);
    if json {
        print_json(&VectorSample { point: at, value });
    } else {
        println!(
            "distort({}, {}, {}) = ({}, {}, {})",
            at.x, at.y, at.z, value.x, value.y, value.z
        );
    }
}

fn run_cellular(
    at: Vec3,
    params: &CellularParams,
    mode: Option<String>,
    classic: bool,
    json: bool,
) {
    let value = if classic {
        let mode = match mode {
            Some(name) => name.parse::<ClassicCellularOutput>().unwrap_or_else(|e| fail(e)),
            None => ClassicCellularOutput::Dist1,
        };
        cellular::evaluate_classic(at, params, mode)
    } else {
        let mode = match mode {
            Some(name) => name.parse::<CellularOutput>().unwrap_or_else(|e| fail(e)),
            None => CellularOutput::F1,
        };
        cellular::evaluate(at, params, mode)
    };

    if json {
        print_json(&Sample { point: at, value });
    } else {
        println!("cellular({}, {}, {}) = {}", at.x, at.y, at.z, value);
    }
}

fn run_info() {
    println!("fractal-noise - Recognised Names");
    println!("================================");
    println!();
    println!("Noise kinds:        {}", NoiseKind::NAMES.join(", "));
    println!("Noise qualities:    {}", NoiseQuality::NAMES.join(", "));
    println!("Distance metrics:   {}", DistanceMetric::NAMES.join(", "));
    println!("Cellular outputs:   {}", CellularOutput::NAMES.join(", "));
    println!("Classic outputs:    {}", ClassicCellularOutput::NAMES.join(", "));
    println!();
    println!("Default fractal node:");
    print_json(&FractalShader::default());
    println!();
    println!("Default cellular node:");
    print_json(&CellularParams::default());
}
