use ahash::AHashMap;
use ctxsim_core::{Error, Result, Vector, WordVectorModel};
use std::fmt::Write as _;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// In-memory word-vector model
///
/// Unknown terms are an error; bags are expected to be filtered to the
/// vocabulary before they reach the word-vector stage.
#[derive(Debug, Clone)]
pub struct WordVectors {
    dim: usize,
    vectors: AHashMap<String, Vector>,
}

impl WordVectors {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            vectors: AHashMap::new(),
        }
    }

    pub fn insert(&mut self, term: impl Into<String>, vector: Vector) -> Result<()> {
        if vector.dim() != self.dim {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: vector.dim(),
            });
        }
        self.vectors.insert(term.into(), vector);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.vectors.contains_key(term)
    }

    /// Read the word2vec text format: a `<count> <dim>` header, then one
    /// `<term> <f1> .. <fdim>` line per term
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let mut lines = reader.lines();

        let header = lines.next().ok_or_else(|| Error::Parse {
            line: 1,
            message: "missing header".to_string(),
        })??;
        let (count, dim) = parse_header(&header)?;

        let mut model = Self::new(dim);
        model.vectors.reserve(count);

        for (i, line) in lines.enumerate() {
            let line = line?;
            let line_no = i + 2;
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let term = fields.next().unwrap_or_default().to_string();
            let values = fields
                .map(|f| f.parse::<f32>())
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| Error::Parse {
                    line: line_no,
                    message: e.to_string(),
                })?;

            model.insert(term, Vector::new(values)).map_err(|e| Error::Parse {
                line: line_no,
                message: e.to_string(),
            })?;
        }

        if model.len() != count {
            return Err(Error::Parse {
                line: 1,
                message: format!("header declares {} vectors, found {}", count, model.len()),
            });
        }

        info!("Loaded {} word vectors of dimension {} from {:?}", model.len(), dim, path);
        Ok(model)
    }

    /// Write in the format accepted by [`Self::read`], terms sorted
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut out = format!("{} {}\n", self.len(), self.dim);

        let mut terms: Vec<&String> = self.vectors.keys().collect();
        terms.sort();
        for term in terms {
            out.push_str(term);
            for x in self.vectors[term].as_slice() {
                let _ = write!(out, " {}", x);
            }
            out.push('\n');
        }

        let temp_file = path.with_extension("tmp");
        std::fs::write(&temp_file, out)?;
        std::fs::rename(&temp_file, path)?;
        Ok(())
    }
}

fn parse_header(header: &str) -> Result<(usize, usize)> {
    let bad = |message: String| Error::Parse { line: 1, message };
    let mut fields = header.split_whitespace();
    let mut next = |name: &str| -> Result<usize> {
        fields
            .next()
            .ok_or_else(|| bad(format!("missing {} in header", name)))?
            .parse::<usize>()
            .map_err(|e| bad(format!("bad {} in header: {}", name, e)))
    };
    let count = next("count")?;
    let dim = next("dimension")?;
    Ok((count, dim))
}

impl WordVectorModel for WordVectors {
    fn word_to_vec(&self, term: &str) -> Result<Vector> {
        self.vectors
            .get(term)
            .cloned()
            .ok_or_else(|| Error::UnknownTerm(term.to_string()))
    }

    fn vector_size(&self) -> usize {
        self.dim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_text_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.txt");
        std::fs::write(&path, "2 3\nparis 0.1 0.2 0.3\ntexas -1 0 1\n").unwrap();

        let wv = WordVectors::read(&path).unwrap();
        assert_eq!(wv.vector_size(), 3);
        assert_eq!(wv.len(), 2);
        assert_eq!(wv.word_to_vec("texas").unwrap().as_slice(), &[-1.0, 0.0, 1.0]);
        assert!(matches!(wv.word_to_vec("berlin"), Err(Error::UnknownTerm(_))));
    }

    #[test]
    fn test_short_row_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.txt");
        std::fs::write(&path, "2 3\nparis 0.1 0.2 0.3\ntexas -1 0\n").unwrap();

        assert!(matches!(WordVectors::read(&path), Err(Error::Parse { line: 3, .. })));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.txt");
        let mut wv = WordVectors::new(2);
        wv.insert("capital", Vector::new(vec![0.5, -0.25])).unwrap();
        wv.write(&path).unwrap();

        let loaded = WordVectors::read(&path).unwrap();
        assert_eq!(loaded.word_to_vec("capital").unwrap().as_slice(), &[0.5, -0.25]);
    }

    #[test]
    fn test_insert_checks_dimension() {
        let mut wv = WordVectors::new(2);
        assert!(wv.insert("x", Vector::new(vec![1.0])).is_err());
    }
}
