//! Built-in word lists.
//!
//! Cipher tiers grow in word length and rarity; word-guess tiers grow in the
//! number of entries so the hard tier can offer eight distinct options.

/// Short everyday words.
pub const CIPHER_EASY: &[&str] = &[
    "кіт", "сир", "дім", "ліс", "мак", "сон", "рак", "сік", "сад", "мед",
];

/// Medium-length common words.
pub const CIPHER_MEDIUM: &[&str] = &[
    "привіт", "машина", "сонце", "книга", "дощик", "яблуко", "вікно", "річка",
    "ґанок", "птахи",
];

/// Long or uncommon words.
pub const CIPHER_HARD: &[&str] = &[
    "шифрування", "криптографія", "підсолодити", "велосипедист", "їжачок",
    "перехрестя", "журавлина", "ґудзикування", "єдинорожець", "обчислення",
];

/// `(word, definition)` pairs.
pub const DEFINITIONS_EASY: &[(&str, &str)] = &[
    ("кіт", "Домашня тварина, що муркоче"),
    ("сонце", "Зоря, навколо якої обертається Земля"),
    ("хліб", "Випічка з борошна, яку їдять щодня"),
    ("дощ", "Вода, що падає з хмар краплями"),
    ("книга", "Зшиті сторінки з текстом для читання"),
    ("річка", "Природний потік води, що тече руслом"),
    ("сніг", "Білі пластівці, що падають узимку"),
    ("молоко", "Білий напій, який дає корова"),
];

pub const DEFINITIONS_MEDIUM: &[(&str, &str)] = &[
    ("бібліотека", "Місце, де зберігають і видають книжки"),
    ("компас", "Прилад, стрілка якого вказує на північ"),
    ("вулкан", "Гора, з якої може вивергатися лава"),
    ("маяк", "Башта зі світлом для кораблів"),
    ("термометр", "Прилад для вимірювання температури"),
    ("пустеля", "Велика суха місцевість з піском"),
    ("парасоля", "Річ, що захищає від дощу"),
    ("годинник", "Прилад, що показує час"),
    ("глобус", "Кругла модель Землі"),
    ("мікроскоп", "Прилад для розглядання дуже дрібних об'єктів"),
];

pub const DEFINITIONS_HARD: &[(&str, &str)] = &[
    ("алгоритм", "Скінченна послідовність кроків для розв'язання задачі"),
    ("шифр", "Система таємного письма"),
    ("палімпсест", "Рукопис, написаний поверх змитого тексту"),
    ("етимологія", "Наука про походження слів"),
    ("оксюморон", "Поєднання слів із протилежним значенням"),
    ("криптограма", "Текст, записаний таємним кодом"),
    ("анаграма", "Слово, утворене перестановкою літер іншого слова"),
    ("паліндром", "Слово, що однаково читається в обох напрямках"),
    ("метафора", "Перенесення значення за подібністю"),
    ("гіпербола", "Навмисне художнє перебільшення"),
    ("евфемізм", "Пом'якшений вислів замість грубого"),
    ("неологізм", "Нове слово в мові"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn lists_have_no_duplicates() {
        for list in [CIPHER_EASY, CIPHER_MEDIUM, CIPHER_HARD] {
            let set: HashSet<_> = list.iter().collect();
            assert_eq!(set.len(), list.len());
        }
        for dict in [DEFINITIONS_EASY, DEFINITIONS_MEDIUM, DEFINITIONS_HARD] {
            let set: HashSet<_> = dict.iter().map(|(w, _)| w).collect();
            assert_eq!(set.len(), dict.len());
        }
    }
}
