/// Collapses a fine-grained tag onto its part-of-speech family: any `VB*`
/// tag becomes `VERB`, `NN*` becomes `NOUN`, `RB*` becomes `ADV` and `JJ*`
/// becomes `ADJ`. Other tags are returned unchanged.
pub fn parent_tag(tag: &str) -> &str {
    if tag == "VERB" || tag.starts_with("VB") {
        "VERB"
    } else if tag == "NOUN" || tag.starts_with("NN") {
        "NOUN"
    } else if tag.starts_with("ADV") || tag.starts_with("RB") {
        "ADV"
    } else if tag.starts_with("ADJ") || tag.starts_with("JJ") {
        "ADJ"
    } else {
        tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parents() {
        for (tag, parent) in [
            ("VBZ", "VERB"),
            ("VB", "VERB"),
            ("VERB", "VERB"),
            ("NNS", "NOUN"),
            ("NNP", "NOUN"),
            ("RBR", "ADV"),
            ("ADV", "ADV"),
            ("JJS", "ADJ"),
            ("ADJ", "ADJ"),
            ("DT", "DT"),
            (".", "."),
            ("V", "V"),
        ] {
            assert_eq!(parent_tag(tag), parent, "{tag}");
        }
    }
}
