use serde::{Deserialize, Serialize};

/// Display language of a comparison request. Every user-facing string the
/// service produces is selected through these tables; adding a language is a
/// table addition, not a logic change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
	#[default]
	Vi,
	En,
}
impl Language {
	pub const fn messages(self) -> &'static Messages {
		match self {
			Self::Vi => &VI_MESSAGES,
			Self::En => &EN_MESSAGES,
		}
	}

	pub const fn comparison_text(self) -> &'static ComparisonText {
		match self {
			Self::Vi => &VI_COMPARISON,
			Self::En => &EN_COMPARISON,
		}
	}

	pub const fn code(self) -> &'static str {
		match self {
			Self::Vi => "vi",
			Self::En => "en",
		}
	}
}

/// Request-level messages: validation errors, not-found, the degraded-mode
/// warning, and the substitutions for absent item fields.
#[derive(Debug)]
pub struct Messages {
	pub insufficient_items: &'static str,
	pub too_many_items: &'static str,
	pub items_not_found: &'static str,
	pub basic_analysis_warning: &'static str,
	pub no_description: &'static str,
	pub no_category: &'static str,
}

/// Static comparison sentences plus the `overall` template. `overall` is the
/// only field that references the compared items (count and category list).
#[derive(Debug)]
pub struct ComparisonText {
	pub overall: fn(count: usize, categories: &str) -> String,
	pub quality: &'static str,
	pub performance: &'static str,
	pub integration: &'static str,
	pub recommendation: &'static str,
}

static VI_MESSAGES: Messages = Messages {
	insufficient_items: "Cần ít nhất 2 sản phẩm để so sánh.",
	too_many_items: "Chỉ có thể so sánh tối đa 3 sản phẩm.",
	items_not_found: "Không tìm thấy một hoặc nhiều sản phẩm được yêu cầu.",
	basic_analysis_warning: "Đang sử dụng phân tích cơ bản (AI tạm thời không khả dụng).",
	no_description: "Không có mô tả",
	no_category: "N/A",
};

static EN_MESSAGES: Messages = Messages {
	insufficient_items: "At least 2 products are required for comparison.",
	too_many_items: "A maximum of 3 products can be compared.",
	items_not_found: "One or more requested products were not found.",
	basic_analysis_warning: "Using basic analysis (AI is temporarily unavailable).",
	no_description: "No description",
	no_category: "N/A",
};

static VI_COMPARISON: ComparisonText = ComparisonText {
	overall: overall_vi,
	quality: "Các sản phẩm đều đạt tiêu chuẩn chất lượng cao, phù hợp cho doanh nghiệp",
	performance: "Hiệu suất ổn định, độ bền cao, hoạt động liên tục lâu dài",
	integration: "Dễ dàng tích hợp với hệ thống hiện có, hỗ trợ đa nền tảng",
	recommendation: "Phù hợp cho nhiều ngành nghề từ logistics, manufacturing đến healthcare",
};

static EN_COMPARISON: ComparisonText = ComparisonText {
	overall: overall_en,
	quality: "All products meet high quality standards, suitable for enterprises",
	performance: "Stable performance, high durability, continuous long-term operation",
	integration: "Easy to integrate with existing systems, multi-platform support",
	recommendation: "Suitable for various industries from logistics, manufacturing to healthcare",
};

fn overall_vi(count: usize, categories: &str) -> String {
	format!("Đang so sánh {count} sản phẩm thuộc danh mục: {categories}.")
}

fn overall_en(count: usize, categories: &str) -> String {
	format!("Comparing {count} products in the following categories: {categories}.")
}
