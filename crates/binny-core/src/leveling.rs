//! 经验值与等级换算

/// 各等级的经验区间（闭区间），按等级升序排列，下标 + 1 即等级
const XP_LEVELS: [(i64, i64); 10] = [
    (0, 99),
    (100, 249),
    (250, 499),
    (500, 999),
    (1000, 1999),
    (2000, 3999),
    (4000, 6999),
    (7000, 9999),
    (10000, 14999),
    (15000, i64::MAX),
];

/// 根据经验值计算等级
///
/// 返回第一个包含该经验值的区间对应的等级；没有匹配时（仅负数经验）返回 1。
pub fn level_for_xp(xp: i64) -> u32 {
    XP_LEVELS
        .iter()
        .position(|&(min, max)| min <= xp && xp <= max)
        .map(|idx| idx as u32 + 1)
        .unwrap_or(1)
}

/// 获得 `earned_xp` 后达到 `resulting_xp`，是否跨越了等级
pub fn is_level_up(resulting_xp: i64, earned_xp: i64) -> bool {
    earned_xp > 0 && level_for_xp(resulting_xp) > level_for_xp(resulting_xp - earned_xp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_inside_each_range() {
        let cases = [
            (0, 1),
            (50, 1),
            (150, 2),
            (300, 3),
            (750, 4),
            (1500, 5),
            (3000, 6),
            (5000, 7),
            (8000, 8),
            (12000, 9),
            (20000, 10),
            (i64::MAX, 10),
        ];
        for (xp, expected) in cases {
            assert_eq!(level_for_xp(xp), expected, "xp={xp}");
        }
    }

    #[test]
    fn test_level_boundaries() {
        let boundaries = [
            (99, 1, 100, 2),
            (249, 2, 250, 3),
            (499, 3, 500, 4),
            (999, 4, 1000, 5),
            (1999, 5, 2000, 6),
            (3999, 6, 4000, 7),
            (6999, 7, 7000, 8),
            (9999, 8, 10000, 9),
            (14999, 9, 15000, 10),
        ];
        for (below, below_level, at, at_level) in boundaries {
            assert_eq!(level_for_xp(below), below_level, "xp={below}");
            assert_eq!(level_for_xp(at), at_level, "xp={at}");
        }
    }

    #[test]
    fn test_ranges_are_contiguous() {
        for pair in XP_LEVELS.windows(2) {
            assert_eq!(pair[0].1 + 1, pair[1].0);
        }
        assert_eq!(XP_LEVELS[0].0, 0);
    }

    #[test]
    fn test_negative_xp_falls_back_to_level_one() {
        assert_eq!(level_for_xp(-1), 1);
        assert_eq!(level_for_xp(i64::MIN), 1);
    }

    #[test]
    fn test_is_level_up() {
        assert!(is_level_up(500, 500));
        assert!(is_level_up(1000, 500));
        assert!(!is_level_up(1500, 500));
        assert!(!is_level_up(0, 0));
        // 单次 500 经验可能连跳多级，仍视为升级
        assert!(is_level_up(500, 500) && level_for_xp(500) - level_for_xp(0) == 3);
    }
}
