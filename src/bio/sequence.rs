use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alphabet {
    Dna,
    Rna,
}

impl Alphabet {
    /// Classify residues by the presence of uracil. Any `U`/`u` marks the
    /// sequence as RNA; everything else is treated as DNA.
    pub fn detect(residues: &[u8]) -> Self {
        if residues.iter().any(|&b| b == b'U' || b == b'u') {
            Alphabet::Rna
        } else {
            Alphabet::Dna
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence {
    pub id: String,
    pub description: Option<String>,
    pub residues: Vec<u8>,
    pub alphabet: Alphabet,
}

impl Sequence {
    pub fn new(id: String, residues: Vec<u8>) -> Self {
        let alphabet = Alphabet::detect(&residues);
        Self {
            id,
            description: None,
            residues,
            alphabet,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn header(&self) -> String {
        let mut header = format!(">{}", self.id);

        if let Some(desc) = &self.description {
            header.push(' ');
            header.push_str(desc);
        }

        header
    }

    /// Convert RNA residues to their DNA form by replacing uracil with
    /// thymine. Case is preserved and no other residue is touched, so DNA
    /// sequences pass through unchanged.
    pub fn to_dna(mut self) -> Self {
        if self.alphabet == Alphabet::Rna {
            for b in &mut self.residues {
                match *b {
                    b'U' => *b = b'T',
                    b'u' => *b = b't',
                    _ => {}
                }
            }
            self.alphabet = Alphabet::Dna;
        }
        self
    }
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.residues))
    }
}
