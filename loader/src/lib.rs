use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use common::constants::MEM_SIZE;

use log::debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: invalid binary literal {text:?}")]
    Malformed { line: usize, text: String },

    #[error("program is {len} bytes, memory only holds {}", MEM_SIZE)]
    TooLarge { len: usize },
}

// A program image, to be copied into memory starting at address 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub bytes: Vec<u8>,
}

impl Program {
    const COMMENT: char = '#';
    const MAX_DIGITS: usize = u8::BITS as usize;

    pub fn empty() -> Program {
        Program { bytes: vec![] }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Program, LoadError> {
        let path = path.as_ref();
        let io_err = |source| LoadError::Io { path: path.display().to_string(), source };

        let file = File::open(path).map_err(io_err)?;
        let prog = Self::read_from(&mut BufReader::new(file)).map_err(|e| match e {
            LoadError::Io { source, .. } => io_err(source),
            e => e,
        })?;
        debug!("Loaded {} bytes from {}", prog.len(), path.display());
        Ok(prog)
    }

    pub fn read_from(reader: &mut impl BufRead) -> Result<Program, LoadError> {
        let mut prog = Program::empty();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| LoadError::Io { path: "<input>".into(), source })?;
            if let Some(byte) = Self::parse_line(&line, idx + 1)? {
                prog.bytes.push(byte);
            }
        }

        if prog.len() > MEM_SIZE {
            return Err(LoadError::TooLarge { len: prog.len() });
        }
        Ok(prog)
    }

    pub fn parse(src: &str) -> Result<Program, LoadError> {
        Self::read_from(&mut src.as_bytes())
    }

    // Returns None for blank and comment-only lines. line is 1-based.
    fn parse_line(line: &str, line_num: usize) -> Result<Option<u8>, LoadError> {
        let code = match line.split_once(Self::COMMENT) {
            Some((code, _comment)) => code,
            None => line,
        };
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }

        let malformed = || LoadError::Malformed { line: line_num, text: code.to_string() };

        // from_str_radix alone would also take a leading '+'.
        if code.len() > Self::MAX_DIGITS || !code.chars().all(|c| c == '0' || c == '1') {
            return Err(malformed());
        }
        u8::from_str_radix(code, 2).map(Some).map_err(|_| malformed())
    }
}
