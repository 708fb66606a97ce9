//! Модуль разбиения сценария на сцены
//!
//! Этот модуль содержит функции для разбиения исходного текста на блоки сцен.

/// Минимальное количество слов в группе предложений при разбиении без абзацев
const SENTENCE_GROUP_WORDS: usize = 18;

/// Разбить сценарий на блоки сцен
///
/// Текст делится по пустым строкам на абзацы; если абзацной структуры нет,
/// выполняется грубое разбиение по предложениям с ограничением по количеству слов.
pub fn split_script(text: &str) -> Vec<String> {
    let blocks: Vec<String> = text
        .split("\n\n")
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect();

    if blocks.len() > 1 {
        return blocks;
    }

    let rough = split_sentences(text);
    if rough.is_empty() {
        blocks
    } else {
        rough
    }
}

/// Грубое разбиение по предложениям с накоплением до порога слов
fn split_sentences(text: &str) -> Vec<String> {
    let normalized = text.replace('?', ".").replace('!', ".");
    let mut groups = Vec::new();
    let mut buf: Vec<String> = Vec::new();

    for part in normalized.split('.') {
        let t = part.trim();
        if t.is_empty() {
            continue;
        }
        buf.push(t.to_string());

        let word_count: usize = buf.iter().map(|s| s.split_whitespace().count()).sum();
        if word_count >= SENTENCE_GROUP_WORDS {
            groups.push(format!("{}.", buf.join(". ")));
            buf.clear();
        }
    }

    if !buf.is_empty() {
        groups.push(format!("{}.", buf.join(". ")));
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_paragraphs() {
        let text = "Intro: what a heat pump is.\n\nHow it works: it moves heat.\n\nOutro: subscribe!";
        let blocks = split_script(text);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], "Intro: what a heat pump is.");
        assert_eq!(blocks[2], "Outro: subscribe!");
    }

    #[test]
    fn test_paragraphs_skip_blank_blocks() {
        let text = "First scene.\n\n   \n\nSecond scene.";
        let blocks = split_script(text);
        assert_eq!(blocks, vec!["First scene.", "Second scene."]);
    }

    #[test]
    fn test_sentence_fallback_groups_by_word_count() {
        // Один абзац без пустых строк: восемь предложений по четыре слова
        let text = "one two three four. \
                    five six seven eight! \
                    nine ten eleven twelve? \
                    alpha beta gamma delta. \
                    epsilon zeta eta theta. \
                    iota kappa lambda mu. \
                    nu xi omicron pi. \
                    rho sigma tau upsilon.";
        let blocks = split_script(text);
        assert!(blocks.len() > 1);
        for block in &blocks {
            assert!(block.ends_with('.'));
        }
        // Каждая группа, кроме последней, набирает не меньше порога слов
        for block in &blocks[..blocks.len() - 1] {
            assert!(block.split_whitespace().count() >= SENTENCE_GROUP_WORDS);
        }
    }

    #[test]
    fn test_short_single_paragraph_is_one_scene() {
        let blocks = split_script("Just a short line.");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0], "Just a short line.");
    }

    #[test]
    fn test_empty_input() {
        assert!(split_script("").is_empty());
        assert!(split_script("   \n\n  ").is_empty());
    }
}
