/// Administrative display order of the municipalities and counties listed
/// under the nation.
pub const CITY_ORDER: [&str; 22] = [
    "臺北市",
    "新北市",
    "桃園市",
    "臺中市",
    "臺南市",
    "高雄市",
    "基隆市",
    "新竹市",
    "嘉義市",
    "新竹縣",
    "苗栗縣",
    "彰化縣",
    "南投縣",
    "雲林縣",
    "嘉義縣",
    "屏東縣",
    "宜蘭縣",
    "花蓮縣",
    "臺東縣",
    "澎湖縣",
    "金門縣",
    "連江縣",
];

/// `province-city` entries that never appear in child listings: the nation
/// aggregate and the Taiwan / Fujian province aggregates.
pub const EXCLUDED_PROVINCES: [&str; 3] = ["00-000", "10-000", "09-000"];

fn display_rank(name: &str) -> usize {
    CITY_ORDER
        .iter()
        .position(|known| *known == name)
        .unwrap_or(CITY_ORDER.len())
}

/// Stable sort by display order; unknown names keep their relative order
/// after every known one.
pub fn sort_by_display_order<T, F>(items: &mut [T], name: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_key(|item| display_rank(name(item)));
}
