use super::types::Section;

/// Average reading speed used for estimates.
pub const CHARACTERS_PER_SECOND: u64 = 18;

const CHARACTERS_PER_MINUTE: u64 = CHARACTERS_PER_SECOND * 60;

/// Sums the character count of every body block across all sections.
///
/// Counts UTF-16 code units, the unit Prismic uses for text lengths and
/// span offsets. Blocks without text (images, embeds) count as zero.
pub fn count_characters(sections: &[Section]) -> u64 {
    sections
        .iter()
        .flat_map(|section| section.body.iter())
        .map(|block| block.text().encode_utf16().count() as u64)
        .sum()
}

/// Estimates how many whole minutes it takes to read the given sections.
///
/// `characters / 18` gives seconds; seconds are divided by 60 and rounded
/// half-up, so 1.5 minutes reads as 2.
pub fn estimate_reading_time(sections: &[Section]) -> u64 {
    let total = count_characters(sections);
    (total + CHARACTERS_PER_MINUTE / 2) / CHARACTERS_PER_MINUTE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::types::{BodyBlock, Image};

    fn section_with_chars(count: usize) -> Section {
        Section::new("Heading", vec![BodyBlock::paragraph("a".repeat(count))])
    }

    #[test]
    fn test_empty_content_is_zero_minutes() {
        assert_eq!(estimate_reading_time(&[]), 0);
    }

    #[test]
    fn test_sections_without_blocks_are_zero_minutes() {
        let sections = vec![Section::new("Only a heading", vec![])];
        assert_eq!(estimate_reading_time(&sections), 0);
    }

    #[test]
    fn test_one_minute_of_text() {
        // 1080 / 18 = 60s
        assert_eq!(estimate_reading_time(&[section_with_chars(1080)]), 1);
    }

    #[test]
    fn test_rounds_down_below_half() {
        // 3600 / 18 = 200s = 3.33 min
        assert_eq!(estimate_reading_time(&[section_with_chars(3600)]), 3);
    }

    #[test]
    fn test_counts_across_sections() {
        // 1800 / 18 = 100s = 1.67 min
        let sections = vec![section_with_chars(900), section_with_chars(900)];
        assert_eq!(count_characters(&sections), 1800);
        assert_eq!(estimate_reading_time(&sections), 2);
    }

    #[test]
    fn test_half_minute_rounds_up() {
        // 1620 / 18 = 90s = 1.5 min
        assert_eq!(estimate_reading_time(&[section_with_chars(1620)]), 2);
        assert_eq!(estimate_reading_time(&[section_with_chars(1619)]), 1);
    }

    #[test]
    fn test_short_text_rounds_to_zero() {
        assert_eq!(estimate_reading_time(&[section_with_chars(539)]), 0);
        assert_eq!(estimate_reading_time(&[section_with_chars(540)]), 1);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let sections = vec![Section::new(
            "Acentuação",
            vec![BodyBlock::paragraph("ação")],
        )];
        assert_eq!(count_characters(&sections), 4);
    }

    #[test]
    fn test_astral_characters_count_as_two_units() {
        let sections = vec![Section::new(
            "Rockets",
            vec![BodyBlock::paragraph("🚀 go")],
        )];
        assert_eq!(count_characters(&sections), 5);
    }

    #[test]
    fn test_headings_and_images_do_not_count() {
        let sections = vec![Section::new(
            "A very long heading that is not part of the body",
            vec![
                BodyBlock::Image(Image {
                    url: "https://example.com/a.png".to_string(),
                    alt: Some("alt text".to_string()),
                }),
                BodyBlock::paragraph("abc"),
            ],
        )];
        assert_eq!(count_characters(&sections), 3);
    }

    #[test]
    fn test_multiple_blocks_in_one_section() {
        let sections = vec![Section::new(
            "Heading",
            vec![
                BodyBlock::paragraph("a".repeat(500)),
                BodyBlock::paragraph("b".repeat(580)),
            ],
        )];
        assert_eq!(estimate_reading_time(&sections), 1);
    }
}
