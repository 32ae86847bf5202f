//! Result data

// Imports
use {
	anyhow::Context,
	std::{fmt, io, str::FromStr},
};

/// Result row for a single array size
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Row {
	/// Array size, in bytes
	pub size: u64,

	/// Random access offset (ns)
	pub random_offset: f64,

	/// Sequential access offset (ns)
	pub sequential_offset: f64,
}

impl fmt::Display for Row {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{},{:.2},{:.2}", self.size, self.random_offset, self.sequential_offset)
	}
}

impl FromStr for Row {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut fields = s.trim().split(',');
		let mut next_field = |name: &str| {
			fields
				.next()
				.map(str::trim)
				.with_context(|| format!("Missing {name} field"))
		};

		let size = next_field("size")?
			.parse()
			.context("Unable to parse size")?;
		let random_offset = next_field("random offset")?
			.parse()
			.context("Unable to parse random offset")?;
		let sequential_offset = next_field("sequential offset")?
			.parse()
			.context("Unable to parse sequential offset")?;
		anyhow::ensure!(fields.next().is_none(), "Row has more than 3 fields");

		Ok(Self {
			size,
			random_offset,
			sequential_offset,
		})
	}
}

/// Parses all rows from `reader`.
///
/// Empty lines are skipped.
pub fn read_rows<R: io::BufRead>(reader: R) -> Result<Vec<Row>, anyhow::Error> {
	reader
		.lines()
		.enumerate()
		.filter(|(_, line)| line.as_ref().map_or(true, |line| !line.trim().is_empty()))
		.map(|(line_idx, line)| {
			let line = line.context("Unable to read line")?;
			line.parse::<Row>()
				.with_context(|| format!("Unable to parse row at line {}: {line:?}", line_idx + 1))
		})
		.collect()
}

/// Row sink
pub trait RowSink {
	/// Writes a row
	fn write_row(&mut self, row: &Row) -> Result<(), anyhow::Error>;
}

impl<S: RowSink + ?Sized> RowSink for &mut S {
	fn write_row(&mut self, row: &Row) -> Result<(), anyhow::Error> {
		(**self).write_row(row)
	}
}

impl<A: RowSink, B: RowSink> RowSink for (A, B) {
	fn write_row(&mut self, row: &Row) -> Result<(), anyhow::Error> {
		self.0.write_row(row)?;
		self.1.write_row(row)
	}
}

impl RowSink for Vec<Row> {
	fn write_row(&mut self, row: &Row) -> Result<(), anyhow::Error> {
		self.push(*row);
		Ok(())
	}
}

/// Writes rows as lines of text to a writer, flushing after each one
#[derive(Debug)]
pub struct RowWriter<W> {
	/// Writer
	writer: W,

	/// Rows written
	rows_written: usize,
}

impl<W: io::Write> RowWriter<W> {
	/// Creates a new row writer
	pub fn new(writer: W) -> Self {
		Self {
			writer,
			rows_written: 0,
		}
	}

	/// Returns the rows written
	pub fn rows_written(&self) -> usize {
		self.rows_written
	}

	/// Finishes writing, returning the writer
	pub fn finish(mut self) -> Result<W, anyhow::Error> {
		self.writer.flush().context("Unable to flush writer")?;
		Ok(self.writer)
	}
}

impl<W: io::Write> RowSink for RowWriter<W> {
	fn write_row(&mut self, row: &Row) -> Result<(), anyhow::Error> {
		writeln!(self.writer, "{row}").context("Unable to write row")?;
		self.writer.flush().context("Unable to flush writer")?;
		self.rows_written += 1;

		Ok(())
	}
}
