//! Built-in demo commands
//!
//! These announce which catalog shape would be drawn. Geometry and painting
//! live outside this crate.

use anyhow::{Context, Result};

use super::output::Output;
use crate::command::{Handler, Palette, Request, Signature};
use crate::config::Config;

/// Shapes the demo knows how to draw, with a one-line description
pub const SHAPES: &[(&str, &str)] = &[
    ("circle", "a round shape defined by its radius"),
    ("square", "four equal sides at right angles"),
    ("triangle", "three sides meeting at three corners"),
];

fn describe(shape: &str) -> Option<(&'static str, &'static str)> {
    SHAPES
        .iter()
        .copied()
        .find(|(name, _)| name.eq_ignore_ascii_case(shape))
}

/// `demo <shape> [--verbose]`
pub struct DemoCommand {
    signature: Signature,
    output: Output,
}

impl DemoCommand {
    pub fn new(output: Output) -> Result<Self> {
        Ok(Self {
            signature: Signature::parse("demo <shape> [--verbose]")?,
            output,
        })
    }
}

impl Handler for DemoCommand {
    fn execute(&self, request: Request) -> Result<()> {
        let requested = request
            .params()
            .first()
            .context("No shape given")?;

        let Some((shape, description)) = describe(requested) else {
            let available: Vec<_> = SHAPES.iter().map(|(name, _)| *name).collect();
            anyhow::bail!(
                "Unknown shape '{}'. Available: {}",
                requested,
                available.join(", ")
            );
        };

        let verbose = request.has_flag("verbose");
        self.output
            .verbose_ctx("demo", &format!("Resolved '{}' to {}", requested, shape));

        if self.output.is_json() {
            self.output.data(&serde_json::json!({
                "action": request.action(),
                "shape": shape,
                "verbose": verbose,
            }));
        } else {
            self.output.success(&format!("Drawing a {}", shape));
            if verbose {
                self.output.line(&format!("  {}", description));
            }
        }

        Ok(())
    }

    fn help_message(&self) -> String {
        format!("draw one of the catalog shapes ({})", self.signature)
    }

    fn signature(&self) -> Option<&Signature> {
        Some(&self.signature)
    }
}

/// `shapes`
pub struct ShapesCommand {
    signature: Signature,
    output: Output,
}

impl ShapesCommand {
    pub fn new(output: Output) -> Result<Self> {
        Ok(Self {
            signature: Signature::parse("shapes")?,
            output,
        })
    }
}

impl Handler for ShapesCommand {
    fn execute(&self, _request: Request) -> Result<()> {
        if self.output.is_json() {
            let items: Vec<_> = SHAPES
                .iter()
                .map(|(name, description)| {
                    serde_json::json!({
                        "name": name,
                        "description": description,
                    })
                })
                .collect();
            self.output.data(&items);
        } else {
            for (name, description) in SHAPES {
                self.output.line(&format!("{:<10} {}", name, description));
            }
        }
        Ok(())
    }

    fn help_message(&self) -> String {
        "list the shapes the demo can draw".to_string()
    }

    fn signature(&self) -> Option<&Signature> {
        Some(&self.signature)
    }
}

/// Builds the palette of built-in commands
pub fn palette(config: &Config, output: Output) -> Result<Palette> {
    let palette = Palette::new()
        .with_usage(config.usage.as_str())
        .add("demo", DemoCommand::new(output)?)?
        .add("shapes", ShapesCommand::new(output)?)?;

    output.verbose_ctx("palette", &format!("Registered {} commands", palette.len()));
    Ok(palette)
}
