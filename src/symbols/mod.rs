//! Symbol resolution seam
//!
//! Maps addresses to named spans in loaded images. The scanner only needs
//! two answers: "does this address fall inside a known symbol" and "where
//! does the next distinct symbol start". On Linux both come from `dladdr`.

use crate::core::types::Address;
use std::collections::BTreeMap;

/// A resolved symbol: its name and the address its span starts at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub span_start: Address,
}

/// Resolves addresses against the loaded images' symbol tables.
pub trait SymbolResolver {
    /// Resolves `address` to the symbol whose span contains it, if any
    fn resolve(&self, address: Address) -> Option<Symbol>;

    /// Finds the start of the first symbol distinct from the one at
    /// `address`, probing forward one address at a time up to `max_probe`
    /// bytes. Returns `None` when no distinct symbol appears in the span.
    fn next_distinct_symbol(&self, address: Address, max_probe: usize) -> Option<Address> {
        let here = self.resolve(address)?;
        for delta in 1..=max_probe {
            let probe = address.offset(delta as isize);
            if let Some(sym) = self.resolve(probe) {
                if sym.span_start != here.span_start {
                    return Some(sym.span_start);
                }
            }
        }
        None
    }
}

/// Resolver that knows no symbols. Traversal runs unchanged without
/// symbol data; every non-heap block just stays unclassified.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSymbols;

impl SymbolResolver for NullSymbols {
    fn resolve(&self, _address: Address) -> Option<Symbol> {
        None
    }
}

/// Map-backed resolver for tests: symbol start address to (name, span length)
#[derive(Debug, Default)]
pub struct MapSymbols {
    spans: BTreeMap<usize, (String, usize)>,
}

impl MapSymbols {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, start: Address, name: impl Into<String>, span: usize) -> &mut Self {
        self.spans.insert(start.as_usize(), (name.into(), span));
        self
    }
}

impl SymbolResolver for MapSymbols {
    fn resolve(&self, address: Address) -> Option<Symbol> {
        let addr = address.as_usize();
        let (&start, (name, span)) = self.spans.range(..=addr).next_back()?;
        if addr < start + span {
            Some(Symbol {
                name: name.clone(),
                span_start: Address::new(start),
            })
        } else {
            None
        }
    }
}

/// `dladdr`-backed resolver for the running process
#[cfg(target_os = "linux")]
#[derive(Debug, Default, Clone, Copy)]
pub struct DlSymbolResolver;

#[cfg(target_os = "linux")]
impl SymbolResolver for DlSymbolResolver {
    fn resolve(&self, address: Address) -> Option<Symbol> {
        let mut info: libc::Dl_info = unsafe { std::mem::zeroed() };
        let rc = unsafe { libc::dladdr(address.as_usize() as *const libc::c_void, &mut info) };
        if rc == 0 || info.dli_saddr.is_null() || info.dli_sname.is_null() {
            return None;
        }
        let name = unsafe { std::ffi::CStr::from_ptr(info.dli_sname) }
            .to_string_lossy()
            .into_owned();
        Some(Symbol {
            name,
            span_start: Address::new(info.dli_saddr as usize),
        })
    }
}
