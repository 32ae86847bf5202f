//! Multiple runs

// Imports
use {average::Variance, memlat::Row, std::collections::BTreeMap};

/// Averages the offsets of all rows with the same size.
///
/// Returns the rows sorted by size.
pub fn average_rows<I: IntoIterator<Item = Row>>(rows: I) -> Vec<Row> {
	let mut offsets = BTreeMap::<u64, (Vec<f64>, Vec<f64>)>::new();
	for row in rows {
		let (random, sequential) = offsets.entry(row.size).or_default();
		random.push(row.random_offset);
		sequential.push(row.sequential_offset);
	}

	offsets
		.into_iter()
		.map(|(size, (random, sequential))| {
			let random = random.into_iter().collect::<Variance>();
			let sequential = sequential.into_iter().collect::<Variance>();
			tracing::debug!(
				"{size}: {:.2} ± {:.2} (Random), {:.2} ± {:.2} (Sequential)",
				random.mean(),
				random.error(),
				sequential.mean(),
				sequential.error()
			);

			Row {
				size,
				random_offset: random.mean(),
				sequential_offset: sequential.mean(),
			}
		})
		.collect()
}
