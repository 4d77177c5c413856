use std::fmt;

use common::constants::MEM_SIZE;
use common::decoder::decode;

pub struct Disassembled {
    pub addr: u16,
    pub repr: Vec<u8>,
    pub interp: Option<String>,
}

impl fmt::Display for Disassembled {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let bytes: Vec<String> = self.repr.iter().map(|b| format!("{b:02X}")).collect();
        write!(f, "{:02X}: {:<8}", self.addr, bytes.join(" "))?;
        if let Some(interp) = &self.interp {
            write!(f, "  {interp}")?;
        }
        Ok(())
    }
}

// Bytes that don't decode (unknown opcode, bad register, cut off by the end
// of the image) are listed one at a time with no interpretation.
pub fn disassemble(bin: &[u8]) -> Vec<Disassembled> {
    assert!(bin.len() <= MEM_SIZE);
    let mut out = vec![];
    let mut addr: usize = 0;
    while addr < bin.len() {
        match decode(&bin[addr..]) {
            Ok(ins) => {
                let size = ins.size() as usize;
                out.push(Disassembled {
                    addr: addr as u16,
                    repr: bin[addr..addr + size].into(),
                    interp: Some(ins.to_string()),
                });
                addr += size;
            },
            Err(_) => {
                out.push(Disassembled {
                    addr: addr as u16,
                    repr: vec![bin[addr]],
                    interp: None,
                });
                addr += 1;
            },
        }
    }

    out
}
