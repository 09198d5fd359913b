//! Pretty-printing for IR
//!
//! Provides human-readable output for debugging IR structures.

use super::block::BasicBlock;
use super::function::IrFunction;
use super::module::IrModule;
use std::fmt::{self, Write};

/// Trait for pretty-printing IR constructs
pub trait PrettyPrint {
    /// Multi-line dump of `self`
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for IrModule {
    fn pretty_print(&self) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail
        let _ = write_module(&mut output, self);
        output
    }
}

impl PrettyPrint for IrFunction {
    fn pretty_print(&self) -> String {
        let mut output = String::new();
        let _ = write_function(&mut output, self);
        output
    }
}

fn write_module(out: &mut String, module: &IrModule) -> fmt::Result {
    writeln!(out, "; module {}", module.name)?;
    writeln!(out)?;

    for class in &module.classes {
        match &class.parent {
            Some(parent) => writeln!(out, "; class {} : {}", class.id, parent)?,
            None => writeln!(out, "; class {}", class.id)?,
        }
        for field in &class.fields {
            writeln!(out, ";   field {}: type{}", field.name, field.ty.as_u32())?;
        }
        writeln!(out)?;
    }

    for func in &module.functions {
        write_function(out, func)?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_function(out: &mut String, func: &IrFunction) -> fmt::Result {
    let params: Vec<String> = func.params.iter().map(|p| p.to_string()).collect();
    writeln!(
        out,
        "fn {}({}) -> type{} {{",
        func.name(),
        params.join(", "),
        func.return_ty.as_u32()
    )?;
    writeln!(out, "  ; at {}", func.source_span)?;

    for block in &func.blocks {
        write_block(out, block, 2)?;
    }

    writeln!(out, "}}")
}

fn write_block(out: &mut String, block: &BasicBlock, indent: usize) -> fmt::Result {
    let prefix = " ".repeat(indent);

    if let Some(label) = &block.label {
        writeln!(out, "{}{}: ; {}", prefix, block.id, label)?;
    } else {
        writeln!(out, "{}{}:", prefix, block.id)?;
    }

    for instr in &block.instructions {
        writeln!(out, "{}  {}", prefix, instr)?;
    }

    writeln!(out, "{}  {}", prefix, block.terminator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{FunctionBuilder, IrConstant, Terminator};
    use crate::symbols::{CallableId, FqName};
    use crate::types::TypeContext;

    #[test]
    fn test_pretty_print_function() {
        let types = TypeContext::new();
        let callable = CallableId::top_level(FqName::parse("demo"), "greet");
        let mut builder = FunctionBuilder::new(callable, types.string_type());
        let value = builder.constant(IrConstant::String("hi".into()), types.string_type());
        builder.terminate(Terminator::Return(Some(value)));

        let text = builder.finish().pretty_print();
        assert!(text.starts_with("fn demo.greet() -> type1 {"));
        assert!(text.contains("r0:1 = \"hi\""));
        assert!(text.contains("return r0:1"));
        assert!(text.contains("<no source>"));
    }
}
