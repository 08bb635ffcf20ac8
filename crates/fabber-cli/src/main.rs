//! Command-line front end: registers shapes and writes a G-code file.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::Rng;

use fabber::{InfillPattern, Printer};
use fabber_gcode::PrintSettings;

#[derive(Parser)]
#[command(name = "fabber", version, about = "Generate G-code for cubes and cylinders")]
struct Cli {
    /// Output G-code file.
    #[arg(short, long, default_value = "output.gcode")]
    output: PathBuf,

    /// JSON file with print settings (defaults are used otherwise).
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Fixed seed for the layer interleaving order.
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fill the plate with a grid of cubes of slightly varying heights.
    DemoPlate,
    /// Print the given shapes.
    ///
    /// Each spec is `cube:X,Y,SIZE[,PATTERN]` or `cyl:X,Y,RADIUS,HEIGHT`,
    /// with PATTERN one of inward, outward, sweep.
    Shapes {
        /// Shape specs.
        specs: Vec<String>,
    },
}

fn load_settings(path: Option<&PathBuf>) -> Result<PrintSettings> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open settings file {}", path.display()))?;
            serde_json::from_reader(file)
                .with_context(|| format!("cannot parse settings file {}", path.display()))
        }
        None => Ok(PrintSettings::default()),
    }
}

fn demo_plate(printer: &mut Printer) -> Result<usize> {
    let mut rng = rand::thread_rng();
    let mut count = 0;
    let (width, depth) = (printer.settings().build_width, printer.settings().build_depth);

    let mut x = 10.0;
    while x < width {
        let mut y = 10.0;
        while y < depth {
            let size = 5.0 + rng.gen_range(0.0..2.0);
            if printer.add_cube(x, y, size).is_ok() {
                count += 1;
            }
            y += 22.0;
        }
        x += 22.0;
    }
    Ok(count)
}

fn parse_spec(printer: &mut Printer, spec: &str) -> Result<()> {
    let (kind, rest) = spec
        .split_once(':')
        .with_context(|| format!("malformed shape spec '{spec}'"))?;
    let fields: Vec<&str> = rest.split(',').collect();

    match (kind, fields.as_slice()) {
        ("cube", [x, y, size]) => {
            printer.add_cube(parse_num(x)?, parse_num(y)?, parse_num(size)?)?;
        }
        ("cube", [x, y, size, pattern]) => {
            let infill = match *pattern {
                "inward" => InfillPattern::InwardSpiral,
                "outward" => InfillPattern::OutwardSpiral,
                "sweep" => InfillPattern::Boustrophedon,
                other => bail!("unknown infill pattern '{other}'"),
            };
            printer.add_cube_with_infill(parse_num(x)?, parse_num(y)?, parse_num(size)?, infill)?;
        }
        ("cyl", [x, y, radius, height]) => {
            printer.add_cylinder(
                parse_num(x)?,
                parse_num(y)?,
                parse_num(radius)?,
                parse_num(height)?,
            )?;
        }
        _ => bail!("malformed shape spec '{spec}'"),
    }
    Ok(())
}

fn parse_num(field: &str) -> Result<f64> {
    field
        .parse()
        .with_context(|| format!("'{field}' is not a number"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.settings.as_ref())?;
    let mut printer = Printer::new(settings).context("settings rejected")?;

    let count = match &cli.command {
        Command::DemoPlate => demo_plate(&mut printer)?,
        Command::Shapes { specs } => {
            if specs.is_empty() {
                bail!("no shapes given");
            }
            for spec in specs {
                parse_spec(&mut printer, spec)
                    .with_context(|| format!("cannot register '{spec}'"))?;
            }
            specs.len()
        }
    };

    let file = File::create(&cli.output)
        .with_context(|| format!("cannot create {}", cli.output.display()))?;
    let mut sink = BufWriter::new(file);
    match cli.seed {
        Some(seed) => printer.generate_seeded(&mut sink, seed)?,
        None => printer.generate(&mut sink)?,
    }

    println!("wrote {} shapes to {}", count, cli.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cube_spec() {
        let mut printer = Printer::new(PrintSettings::default()).unwrap();
        parse_spec(&mut printer, "cube:50,50,10").unwrap();
        parse_spec(&mut printer, "cube:100,100,10,sweep").unwrap();
        assert_eq!(printer.shape_count(), 2);
    }

    #[test]
    fn test_parse_cylinder_spec() {
        let mut printer = Printer::new(PrintSettings::default()).unwrap();
        parse_spec(&mut printer, "cyl:100,100,5,3").unwrap();
        assert_eq!(printer.shape_count(), 1);
    }

    #[test]
    fn test_rejects_malformed_specs() {
        let mut printer = Printer::new(PrintSettings::default()).unwrap();
        assert!(parse_spec(&mut printer, "sphere:1,2,3").is_err());
        assert!(parse_spec(&mut printer, "cube:1,2").is_err());
        assert!(parse_spec(&mut printer, "cube:a,b,c").is_err());
        assert!(parse_spec(&mut printer, "cube").is_err());
        assert_eq!(printer.shape_count(), 0);
    }
}
