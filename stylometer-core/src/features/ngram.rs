use std::ops::RangeInclusive;
use std::thread;

use indexmap::IndexMap;

use crate::error::{Result, StyloError};

/// Occurrence table of word n-grams of one fixed size.
///
/// # Responsibilities
/// - Count every contiguous window of `n` tokens, joined by a single space
/// - Derive a filtered copy holding only frequent n-grams
/// - Rank n-grams by count
///
/// # Invariants
/// - `n` is always >= 1
/// - Keys are unique and every count is >= 1
/// - Iteration follows discovery order (first occurrence in the token sequence)
#[derive(Clone, Debug, PartialEq)]
pub struct NGramTable {
	/// Number of tokens per n-gram
	n: usize,

	/// Mapping from the joined n-gram to its occurrence count
	counts: IndexMap<String, usize>,
}

impl NGramTable {
	/// Creates an empty table of order `n`.
	///
	/// # Errors
	/// Returns an error if `n == 0`.
	pub fn new(n: usize) -> Result<Self> {
		if n == 0 {
			return Err(StyloError::InvalidParameter("n-gram size must be >= 1".to_owned()));
		}
		Ok(Self { n, counts: IndexMap::new() })
	}

	/// Builds the table of order `n` over a whole token sequence.
	pub fn from_tokens(tokens: &[String], n: usize) -> Result<Self> {
		let mut table = Self::new(n)?;
		table.add_tokens(tokens);
		Ok(table)
	}

	pub fn n(&self) -> usize {
		self.n
	}

	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Occurrences of `ngram`, 0 if never seen.
	pub fn count(&self, ngram: &str) -> usize {
		self.counts.get(ngram).copied().unwrap_or(0)
	}

	/// Adds every window of the token sequence at stride 1.
	///
	/// # Notes
	/// - Sequences shorter than `n` add nothing.
	pub fn add_tokens(&mut self, tokens: &[String]) {
		for window in tokens.windows(self.n) {
			*self.counts.entry(window.join(" ")).or_insert(0) += 1;
		}
	}

	/// New table holding only n-grams seen strictly more than `qualifier` times.
	///
	/// The source table is left untouched.
	pub fn frequent(&self, qualifier: usize) -> Self {
		let counts = self
			.counts
			.iter()
			.filter(|(_, count)| **count > qualifier)
			.map(|(ngram, count)| (ngram.clone(), *count))
			.collect();
		Self { n: self.n, counts }
	}

	/// At most `cap` n-grams, most frequent first.
	///
	/// The sort is stable: equal counts keep discovery order.
	pub fn top(&self, cap: usize) -> Vec<String> {
		let mut ranked: Vec<(&String, usize)> = self.counts.iter().map(|(ngram, count)| (ngram, *count)).collect();
		ranked.sort_by(|a, b| b.1.cmp(&a.1));
		ranked.into_iter().take(cap).map(|(ngram, _)| ngram.clone()).collect()
	}
}

/// Report label of an n-gram size (`3` → `"3gram"`).
pub fn size_label(n: usize) -> String {
	format!("{}gram", n)
}

/// Mining parameters for [`mine_ngrams`].
#[derive(Debug, Clone, PartialEq)]
pub struct NGramQuery {
	/// Sizes to mine, inclusive.
	pub sizes: RangeInclusive<usize>,
	/// Keep n-grams seen strictly more than this.
	pub qualifier: usize,
	/// Keep at most this many per size.
	pub cap: usize,
}

/// Top n-grams of one size, or `None` if no n-gram qualifies.
fn mine_size(tokens: &[String], n: usize, qualifier: usize, cap: usize) -> Result<Option<Vec<String>>> {
	tracing::debug!(n, "mining n-grams");
	let table = NGramTable::from_tokens(tokens, n)?;
	let top = table.frequent(qualifier).top(cap);
	Ok(if top.is_empty() { None } else { Some(top) })
}

/// Frequent n-grams for every size in `query.sizes`.
///
/// The result maps `"<n>gram"` to its ranked n-grams, in ascending size
/// order. Sizes where nothing qualifies are absent. Tie order inside a size
/// is discovery order, which callers should not rely on.
///
/// # Errors
/// Returns `InvalidParameter` for a size of 0 or an empty range.
pub fn mine_ngrams(tokens: &[String], query: &NGramQuery) -> Result<IndexMap<String, Vec<String>>> {
	validate(query)?;
	let mut buckets = IndexMap::new();
	for n in query.sizes.clone() {
		if let Some(top) = mine_size(tokens, n, query.qualifier, query.cap)? {
			buckets.insert(size_label(n), top);
		}
	}
	Ok(buckets)
}

/// Same result as [`mine_ngrams`], with sizes spread over worker threads.
///
/// Sizes are independent, so each worker mines its own sizes and the
/// buckets are reassembled in ascending size order afterwards.
pub fn mine_ngrams_parallel(tokens: &[String], query: &NGramQuery) -> Result<IndexMap<String, Vec<String>>> {
	validate(query)?;
	let sizes: Vec<usize> = query.sizes.clone().collect();
	let workers = num_cpus::get().clamp(1, sizes.len());
	let per_worker = sizes.len().div_ceil(workers);

	let mut mined: Vec<(usize, Option<Vec<String>>)> = thread::scope(|scope| {
		let handles: Vec<_> = sizes
			.chunks(per_worker)
			.map(|chunk| {
				scope.spawn(move || {
					chunk
						.iter()
						.map(|&n| mine_size(tokens, n, query.qualifier, query.cap).map(|top| (n, top)))
						.collect::<Result<Vec<_>>>()
				})
			})
			.collect();

		let mut mined = Vec::with_capacity(sizes.len());
		for handle in handles {
			let part = handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic))?;
			mined.extend(part);
		}
		Ok::<_, StyloError>(mined)
	})?;

	mined.sort_by_key(|(n, _)| *n);
	Ok(mined
		.into_iter()
		.filter_map(|(n, top)| top.map(|top| (size_label(n), top)))
		.collect())
}

fn validate(query: &NGramQuery) -> Result<()> {
	if *query.sizes.start() == 0 || query.sizes.is_empty() {
		return Err(StyloError::InvalidParameter(format!(
			"n-gram sizes must satisfy 1 <= min <= max, got {}..={}",
			query.sizes.start(),
			query.sizes.end()
		)));
	}
	Ok(())
}
