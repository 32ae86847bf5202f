//! Creates graphs from `memlat`'s output

// Modules
mod args;
mod runs;

// Imports
use {
	anyhow::Context,
	args::Args,
	clap::Parser,
	gnuplot::{AxesCommon, Caption, Figure, LineWidth},
	itertools::Itertools,
	memlat::{data, Row},
	memlat_util::logger,
	std::{fs, io},
};

fn main() -> Result<(), anyhow::Error> {
	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	anyhow::ensure!(
		args.output.interactive || args.output.file.is_some(),
		"Either `--interactive` or `--output` must be specified"
	);

	// Read all rows and average them by size
	let mut rows = vec![];
	for input_file in &args.input_files {
		let file = fs::File::open(input_file).with_context(|| format!("Unable to open input file {input_file:?}"))?;
		let file_rows = data::read_rows(io::BufReader::new(file))
			.with_context(|| format!("Unable to parse input file {input_file:?}"))?;
		tracing::debug!(?input_file, rows = file_rows.len(), "Read input file");
		rows.extend(file_rows);
	}
	let rows = runs::average_rows(rows);
	anyhow::ensure!(!rows.is_empty(), "Input files had no rows");

	// Log scales can't show non-positive offsets, so skip them
	let random_points = self::positive_points(&rows, |row| row.random_offset);
	let sequential_points = self::positive_points(&rows, |row| row.sequential_offset);
	for (name, points) in [("random", &random_points), ("sequential", &sequential_points)] {
		if points.len() != rows.len() {
			tracing::warn!(
				"Skipping {} non-positive {name} offsets out of {}",
				rows.len() - points.len(),
				rows.len()
			);
		}
	}

	// Cache markers span the whole offset range
	let (min_offset, max_offset) = random_points
		.iter()
		.chain(&sequential_points)
		.map(|&(_, offset)| offset)
		.minmax_by(f64::total_cmp)
		.into_option()
		.unwrap_or((0.1, 100.0));
	let cache_captions = [("L1", args.caches.l1), ("L2", args.caches.l2), ("L3", args.caches.l3)]
		.into_iter()
		.filter_map(|(name, size)| size.map(|size| (format!("{name} ({})", self::fmt_bytes(size)), size)))
		.collect::<Vec<_>>();

	// Build the figure
	let mut fg = Figure::new();
	let axes = fg
		.axes2d()
		.set_title("Latency as a function of array size", &[])
		.set_x_label("Bytes allocated (log scale)", &[])
		.set_y_label("Latency (ns, log scale)", &[])
		.set_x_log(Some(10.0))
		.set_y_log(Some(10.0))
		.lines(
			random_points.iter().map(|&(size, _)| size),
			random_points.iter().map(|&(_, offset)| offset),
			&[Caption("Random access"), LineWidth(1.5)],
		)
		.lines(
			sequential_points.iter().map(|&(size, _)| size),
			sequential_points.iter().map(|&(_, offset)| offset),
			&[Caption("Sequential access"), LineWidth(1.5)],
		);
	for (caption, size) in &cache_captions {
		let size = *size as f64;
		axes.lines([size, size], [min_offset, max_offset], &[Caption(caption.as_str()), LineWidth(1.0)]);
	}

	// Then output it
	if let Some(output_file) = &args.output.file {
		fg.save_to_png(output_file, args.output.width, args.output.height)
			.map_err(|err| anyhow::anyhow!("Unable to save output file: {err:?}"))?;
		tracing::info!(?output_file, "Saved graph");
	}
	if args.output.interactive {
		fg.show().map_err(|err| anyhow::anyhow!("Unable to show graph: {err:?}"))?;
	}

	Ok(())
}

/// Returns all `(size, offset)` points with a positive offset
fn positive_points(rows: &[Row], offset: impl Fn(&Row) -> f64) -> Vec<(f64, f64)> {
	rows.iter()
		.map(|row| (row.size as f64, offset(row)))
		.filter(|&(_, offset)| offset > 0.0)
		.collect()
}

/// Formats a byte count with a binary suffix
fn fmt_bytes(bytes: u64) -> String {
	const SUFFIXES: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

	let mut value = bytes as f64;
	let mut suffix_idx = 0;
	while value >= 1024.0 && suffix_idx + 1 < SUFFIXES.len() {
		value /= 1024.0;
		suffix_idx += 1;
	}

	match value.fract() == 0.0 {
		true => format!("{value} {}", SUFFIXES[suffix_idx]),
		false => format!("{value:.1} {}", SUFFIXES[suffix_idx]),
	}
}
