//! # Algoritmo de Porter (1980)
//!
//! Stemmer clássico para inglês, usado como **fallback** quando o idioma configurado não
//! tem um algoritmo dedicado. Remove sufixos em cinco passos, cada um condicionado à
//! "medida" `m` do radical restante.
//!
//! Uma palavra é vista como `[C](VC)^m[V]`, onde `C` é uma sequência de consoantes e `V`
//! uma sequência de vogais; `m` conta os pares `VC`:
//!
//! | Palavra     | m |
//! |-------------|---|
//! | `tree`      | 0 |
//! | `trouble`   | 1 |
//! | `troubles`  | 2 |
//!
//! Só `a e i o u` (e `y` conforme a posição) são vogais: qualquer outro caractere, inclusive
//! letras acentuadas e maiúsculas, conta como consoante. Todos os sufixos são ASCII, então
//! palavras em outros idiomas também são reduzidas (`"càrregues"` → `"càrregu"`).
//! Palavras com até 2 caracteres são devolvidas intactas.
//!
//! Referência: M.F. Porter, "An algorithm for suffix stripping", *Program* 14(3), 1980.

/// Aplica o algoritmo de Porter a uma palavra.
pub fn stem(word: &str) -> String {
    if word.chars().count() <= 2 {
        return word.to_string();
    }

    let mut w = word.to_string();
    step1a(&mut w);
    step1b(&mut w);
    step1c(&mut w);
    step2(&mut w);
    step3(&mut w);
    step4(&mut w);
    step5(&mut w);
    w
}

fn is_consonant(b: &[u8], i: usize) -> bool {
    match b[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => false,
        b'y' => i == 0 || !is_consonant(b, i - 1),
        _ => true,
    }
}

/// Número de sequências `VC` em `word`.
fn measure(word: &str) -> usize {
    let b = word.as_bytes();
    let mut i = 0;
    let mut m = 0;

    while i < b.len() && is_consonant(b, i) {
        i += 1;
    }
    while i < b.len() {
        while i < b.len() && !is_consonant(b, i) {
            i += 1;
        }
        if i >= b.len() {
            break;
        }
        while i < b.len() && is_consonant(b, i) {
            i += 1;
        }
        m += 1;
    }
    m
}

fn contains_vowel(word: &str) -> bool {
    let b = word.as_bytes();
    (0..b.len()).any(|i| !is_consonant(b, i))
}

/// Compara caracteres, não bytes: bytes de continuação UTF-8 podem se repetir.
fn ends_double_consonant(word: &str) -> bool {
    let mut tail = word.chars().rev();
    match (tail.next(), tail.next()) {
        (Some(last), Some(prev)) => last == prev && is_consonant(word.as_bytes(), word.len() - 1),
        _ => false,
    }
}

/// Termina em consoante-vogal-consoante, com a última consoante diferente de w, x e y.
fn ends_cvc(word: &str) -> bool {
    let b = word.as_bytes();
    let n = b.len();
    n >= 3
        && is_consonant(b, n - 3)
        && !is_consonant(b, n - 2)
        && is_consonant(b, n - 1)
        && !matches!(b[n - 1], b'w' | b'x' | b'y')
}

/// Troca `suffix` por `replacement` se o radical satisfizer `condition`.
///
/// Retorna `true` quando o sufixo casou, mesmo que a condição tenha impedido a troca:
/// em cada passo, apenas o primeiro sufixo que casa é considerado.
fn replace_if(w: &mut String, suffix: &str, replacement: &str, condition: impl Fn(&str) -> bool) -> bool {
    if !w.ends_with(suffix) {
        return false;
    }
    let stem_len = w.len() - suffix.len();
    if condition(&w[..stem_len]) {
        w.truncate(stem_len);
        w.push_str(replacement);
    }
    true
}

fn step1a(w: &mut String) {
    let _ = replace_if(w, "sses", "ss", |_| true)
        || replace_if(w, "ies", "i", |_| true)
        || replace_if(w, "ss", "ss", |_| true)
        || replace_if(w, "s", "", |_| true);
}

fn step1b(w: &mut String) {
    if w.ends_with("eed") {
        replace_if(w, "eed", "ee", |s| measure(s) > 0);
        return;
    }

    let Some(suffix) = ["ed", "ing"].into_iter().find(|s| w.ends_with(s)) else {
        return;
    };
    let stem_len = w.len() - suffix.len();
    if !contains_vowel(&w[..stem_len]) {
        return;
    }
    w.truncate(stem_len);

    if w.ends_with("at") || w.ends_with("bl") || w.ends_with("iz") {
        w.push('e');
    } else if ends_double_consonant(w) && !w.ends_with(['l', 's', 'z']) {
        w.pop();
    } else if measure(w) == 1 && ends_cvc(w) {
        w.push('e');
    }
}

fn step1c(w: &mut String) {
    replace_if(w, "y", "i", contains_vowel);
}

const STEP2_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

fn step2(w: &mut String) {
    for (suffix, replacement) in STEP2_RULES {
        if replace_if(w, suffix, replacement, |s| measure(s) > 0) {
            return;
        }
    }
}

fn step3(w: &mut String) {
    for (suffix, replacement) in STEP3_RULES {
        if replace_if(w, suffix, replacement, |s| measure(s) > 0) {
            return;
        }
    }
}

fn step4(w: &mut String) {
    for suffix in STEP4_SUFFIXES {
        let matched = if *suffix == "ion" {
            replace_if(w, suffix, "", |s| measure(s) > 1 && s.ends_with(['s', 't']))
        } else {
            replace_if(w, suffix, "", |s| measure(s) > 1)
        };
        if matched {
            return;
        }
    }
}

fn step5(w: &mut String) {
    replace_if(w, "e", "", |s| {
        let m = measure(s);
        m > 1 || (m == 1 && !ends_cvc(s))
    });
    if w.ends_with("ll") && measure(w) > 1 {
        w.pop();
    }
}
