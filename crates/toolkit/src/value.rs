/// State of an interactive control, in toolkit terms.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlValue {
	Toggle(bool),
	Text(String),
	Number(f64),
	/// Selected row of a combo box or radio group.
	Index(Option<usize>),
	/// Selected rows of a list.
	Indices(Vec<usize>),
	/// Seconds since the Unix epoch.
	Date(i64),
	/// A date control offering both an absolute date and a relative period.
	DateChoice {
		use_absolute: bool,
		absolute: i64,
		relative: usize,
	},
	Color([u8; 4]),
	/// Identifier of the chosen object, if any.
	Selection(Option<String>),
	Selections(Vec<String>),
	PlotSize {
		percent: bool,
		value: f64,
	},
	DateFormat {
		format: usize,
		months: usize,
		years: bool,
		custom: String,
	},
	/// (report id, columns, rows) per embedded report.
	ReportList(Vec<(u32, u32, u32)>),
}

/// Bounds of a numeric control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
	pub min: f64,
	pub max: f64,
	pub step: f64,
	pub decimals: u8,
}

impl NumericRange {
	pub fn clamp(&self, value: f64) -> f64 {
		if value.is_nan() {
			return self.min;
		}
		value.max(self.min).min(self.max)
	}
}

impl Default for NumericRange {
	fn default() -> Self {
		Self {
			min: f64::MIN,
			max: f64::MAX,
			step: 1.0,
			decimals: 0,
		}
	}
}
