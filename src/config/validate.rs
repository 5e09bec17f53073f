use std::collections::HashSet;
use std::fmt;

use crate::{
    animation::curve::PhaseCurve,
    config::page::{BindingDef, PageConfig, TrackDef},
    foundation::core::ElementId,
    scroll::region::ScrollRegion,
    trigger::swap::ContentSwap,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConfigPathElem {
    Field(&'static str),
    Index(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct ConfigError {
    pub(crate) path: Vec<ConfigPathElem>,
    pub(crate) message: String,
}

impl ConfigError {
    fn at(path: &[ConfigPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[ConfigPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            ConfigPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            ConfigPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

#[derive(Debug, Clone)]
pub(crate) struct ConfigErrors {
    pub(crate) errors: Vec<ConfigError>,
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigErrors {}

pub(crate) fn validate_page(page: &PageConfig) -> Result<(), ConfigErrors> {
    let mut errors = Vec::new();

    if let Err(e) = page.viewport.validate() {
        errors.push(ConfigError::at(&[ConfigPathElem::Field("viewport")], e.to_string()));
    }

    let mut ids = HashSet::<&str>::new();
    for (i, section) in page.sections.iter().enumerate() {
        let path = vec![ConfigPathElem::Field("sections"), ConfigPathElem::Index(i)];

        if section.id.is_empty() {
            errors.push(ConfigError::at(&with(&path, "id"), "id must be non-empty"));
        } else if !ids.insert(section.id.as_str()) {
            errors.push(ConfigError::at(
                &with(&path, "id"),
                format!("duplicate section id \"{}\"", section.id),
            ));
        }
        validate_region(&section.region, &path, &mut errors);
        validate_binding(&section.binding, &with(&path, "binding"), &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigErrors { errors })
    }
}

fn with(path: &[ConfigPathElem], field: &'static str) -> Vec<ConfigPathElem> {
    let mut p = path.to_vec();
    p.push(ConfigPathElem::Field(field));
    p
}

fn with_index(path: &[ConfigPathElem], field: &'static str, i: usize) -> Vec<ConfigPathElem> {
    let mut p = with(path, field);
    p.push(ConfigPathElem::Index(i));
    p
}

fn validate_region(region: &ScrollRegion, path: &[ConfigPathElem], errors: &mut Vec<ConfigError>) {
    if region.element.as_str().is_empty() {
        errors.push(ConfigError::at(&with(path, "trigger"), "trigger must be non-empty"));
    }
    if region.start.is_relative() {
        errors.push(ConfigError::at(
            &with(path, "start"),
            format!("start must be anchored, got \"{}\"", region.start),
        ));
    }
}

fn validate_target(target: &ElementId, path: &[ConfigPathElem], errors: &mut Vec<ConfigError>) {
    if target.as_str().is_empty() {
        errors.push(ConfigError::at(&with(path, "target"), "target must be non-empty"));
    }
}

fn validate_binding(binding: &BindingDef, path: &[ConfigPathElem], errors: &mut Vec<ConfigError>) {
    match binding {
        BindingDef::Sequence { tracks, play_ms } => {
            if tracks.is_empty() {
                errors.push(ConfigError::at(&with(path, "tracks"), "at least one track is required"));
            }
            for (j, track) in tracks.iter().enumerate() {
                validate_track(track, &with_index(path, "tracks", j), errors);
            }
            if *play_ms == Some(0) {
                errors.push(ConfigError::at(&with(path, "play_ms"), "play_ms must be > 0"));
            }
        }
        BindingDef::Swap {
            target,
            len,
            thresholds,
        } => {
            validate_target(target, path, errors);
            let built = match thresholds {
                Some(t) => ContentSwap::with_thresholds(*len, t.iter().copied()),
                None => ContentSwap::evenly_spaced(*len),
            };
            if let Err(e) = built {
                let field = if *len == 0 { "len" } else { "thresholds" };
                errors.push(ConfigError::at(&with(path, field), e.to_string()));
            }
        }
        BindingDef::ItemSwap { target, items } => {
            validate_target(target, path, errors);
            if items.is_empty() {
                errors.push(ConfigError::at(&with(path, "items"), "at least one item is required"));
            }
            for (j, item) in items.iter().enumerate() {
                validate_region(item, &with_index(path, "items", j), errors);
            }
        }
        BindingDef::Counter { target, .. } => validate_target(target, path, errors),
        BindingDef::Pin => {}
    }
}

fn validate_track(track: &TrackDef, path: &[ConfigPathElem], errors: &mut Vec<ConfigError>) {
    if track.targets.is_empty() {
        errors.push(ConfigError::at(&with(path, "targets"), "at least one target is required"));
    }
    for (k, target) in track.targets.iter().enumerate() {
        if target.as_str().is_empty() {
            errors.push(ConfigError::at(
                &with_index(path, "targets", k),
                "target must be non-empty",
            ));
        }
    }
    if track.phases.is_empty() {
        errors.push(ConfigError::at(&with(path, "phases"), "at least one phase is required"));
    } else if let Err(e) = PhaseCurve::new(track.phases.iter().cloned()) {
        errors.push(ConfigError::at(&with(path, "phases"), e.to_string()));
    }
    if !track.duration.is_finite() || track.duration < 0.0 {
        errors.push(ConfigError::at(&with(path, "duration"), "duration must be finite and >= 0"));
    }
    if !track.stagger.is_finite() || track.stagger < 0.0 {
        errors.push(ConfigError::at(&with(path, "stagger"), "stagger must be finite and >= 0"));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/validate.rs"]
mod tests;
