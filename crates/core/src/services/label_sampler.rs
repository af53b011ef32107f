use chrono::NaiveDate;

use crate::models::time_range::LabelBucket;

/// Decides which points on the date axis get a visible label.
pub struct LabelSampler;

impl LabelSampler {
    pub fn new() -> Self {
        Self
    }

    /// Distance between labelled indices for `n` points: `ceil(n / target)`, at least 1.
    pub fn interval(&self, n: usize, bucket: LabelBucket) -> usize {
        n.div_ceil(bucket.target_label_count()).max(1)
    }

    /// One label per date; unlabelled dates get an empty string.
    ///
    /// The first and last dates are always labelled, whatever the interval.
    pub fn labels(&self, dates: &[NaiveDate], bucket: LabelBucket) -> Vec<String> {
        let n = dates.len();
        let interval = self.interval(n, bucket);
        let format = bucket.date_format();

        dates
            .iter()
            .enumerate()
            .map(|(i, date)| {
                if i == 0 || i + 1 == n || i % interval == 0 {
                    date.format(format).to_string()
                } else {
                    String::new()
                }
            })
            .collect()
    }
}

impl Default for LabelSampler {
    fn default() -> Self {
        Self::new()
    }
}
