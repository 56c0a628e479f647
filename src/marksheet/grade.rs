use serde::Serialize;
use std::fmt;

/// 成绩等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

/// 等级分段：按最低百分比从高到低排列，未命中任何分段即为 F
pub const GRADE_BANDS: [(f64, Grade); 5] = [
    (90.0, Grade::APlus),
    (80.0, Grade::A),
    (70.0, Grade::B),
    (60.0, Grade::C),
    (50.0, Grade::D),
];

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 百分比换算等级
///
/// 对任意输入都有定义：超过 100 仍为 A+，负数与 NaN 落到 F。
pub fn grade(percentage: f64) -> Grade {
    GRADE_BANDS
        .iter()
        .find(|(min, _)| percentage >= *min)
        .map(|(_, g)| *g)
        .unwrap_or(Grade::F)
}
