//! Attribute files: a TOML table where every shimmer option is optional.
//!
//! Present fields are routed through the same validating setters used by
//! code, so a negative `intensity` in a file fails exactly like a negative
//! `set_intensity` call. Enum-valued fields accept either a name
//! (`direction = "top_to_bottom"`) or the integer code (`direction = 1`);
//! durations accept integer milliseconds or human-readable strings (`"1.5s"`).

use std::fmt;

use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::builder::ShimmerBuilder;
use crate::color::Rgba;
use crate::kinds::{Direction, Easing, HighlightMode, RepeatCount, RepeatMode, Shape};
use crate::ConfigError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShimmerAttributes {
    /// Selects the color highlight builder; colors are ignored otherwise.
    #[serde(default)]
    pub colored: bool,
    pub clip_to_children: Option<bool>,
    pub auto_start: Option<bool>,
    pub base_alpha: Option<f32>,
    pub highlight_alpha: Option<f32>,
    #[serde(default, deserialize_with = "deserialize_color_opt")]
    pub base_color: Option<Rgba>,
    #[serde(default, deserialize_with = "deserialize_color_opt")]
    pub highlight_color: Option<Rgba>,
    #[serde(default, deserialize_with = "deserialize_millis_opt")]
    pub duration: Option<i64>,
    pub repeat_count: Option<CodeOrName>,
    #[serde(default, deserialize_with = "deserialize_millis_opt")]
    pub repeat_delay: Option<i64>,
    pub repeat_mode: Option<CodeOrName>,
    pub direction: Option<CodeOrName>,
    pub shape: Option<CodeOrName>,
    pub dropoff: Option<f32>,
    pub fixed_width: Option<i64>,
    pub fixed_height: Option<i64>,
    pub intensity: Option<f32>,
    pub width_ratio: Option<f32>,
    pub height_ratio: Option<f32>,
    pub tilt: Option<f32>,
    pub easing: Option<String>,
    /// Number of skeleton rows revealed in sequence by the opacity mask.
    pub item_count: Option<u32>,
}

/// An enum-valued attribute given either by name or by integer code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CodeOrName {
    Code(i64),
    Name(String),
}

impl ShimmerAttributes {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: ShimmerAttributes = toml::from_str(input)?;
        raw.validate()?;
        Ok(raw)
    }

    pub fn highlight_mode(&self) -> HighlightMode {
        if self.colored {
            HighlightMode::Color
        } else {
            HighlightMode::Alpha
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_count == Some(0) {
            return Err(ConfigError::InvalidArgument(
                "item_count must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Starts a builder of the requested mode and applies every present field.
    pub fn to_builder(&self) -> Result<ShimmerBuilder, ConfigError> {
        self.apply(ShimmerBuilder::with_mode(self.highlight_mode()))
    }

    /// Applies every present field on top of `builder`.
    pub fn apply(&self, builder: ShimmerBuilder) -> Result<ShimmerBuilder, ConfigError> {
        let mut builder = builder;
        if let Some(status) = self.clip_to_children {
            builder = builder.set_clip_to_children(status);
        }
        if let Some(status) = self.auto_start {
            builder = builder.set_auto_start(status);
        }
        if let Some(alpha) = self.base_alpha {
            builder = builder.set_base_alpha(alpha);
        }
        if let Some(alpha) = self.highlight_alpha {
            builder = builder.set_highlight_alpha(alpha);
        }
        if let Some(millis) = self.duration {
            builder = builder.set_duration_ms(millis)?;
        }
        if let Some(count) = &self.repeat_count {
            builder = match count {
                CodeOrName::Code(code) => builder.set_repeat_count_code(*code)?,
                CodeOrName::Name(name) => builder.set_repeat_count(name.parse::<RepeatCount>()?),
            };
        }
        if let Some(millis) = self.repeat_delay {
            builder = builder.set_repeat_delay_ms(millis)?;
        }
        if let Some(mode) = &self.repeat_mode {
            builder = match mode {
                CodeOrName::Code(code) => builder.set_repeat_mode_code(*code)?,
                CodeOrName::Name(name) => builder.set_repeat_mode(name.parse::<RepeatMode>()?),
            };
        }
        if let Some(direction) = &self.direction {
            builder = match direction {
                CodeOrName::Code(code) => builder.set_direction_code(*code)?,
                CodeOrName::Name(name) => builder.set_direction(name.parse::<Direction>()?),
            };
        }
        if let Some(shape) = &self.shape {
            builder = match shape {
                CodeOrName::Code(code) => builder.set_shape_code(*code)?,
                CodeOrName::Name(name) => builder.set_shape(name.parse::<Shape>()?),
            };
        }
        if let Some(dropoff) = self.dropoff {
            builder = builder.set_dropoff(dropoff)?;
        }
        if let Some(width) = self.fixed_width {
            builder = builder.set_fixed_width(width)?;
        }
        if let Some(height) = self.fixed_height {
            builder = builder.set_fixed_height(height)?;
        }
        if let Some(intensity) = self.intensity {
            builder = builder.set_intensity(intensity)?;
        }
        if let Some(ratio) = self.width_ratio {
            builder = builder.set_width_ratio(ratio)?;
        }
        if let Some(ratio) = self.height_ratio {
            builder = builder.set_height_ratio(ratio)?;
        }
        if let Some(tilt) = self.tilt {
            builder = builder.set_tilt(tilt);
        }
        if let Some(easing) = &self.easing {
            builder = builder.set_easing(easing.parse::<Easing>()?);
        }

        if builder.mode() == HighlightMode::Color {
            if let Some(color) = self.base_color {
                builder = builder.set_base_color(color);
            }
            if let Some(color) = self.highlight_color {
                builder = builder.set_highlight_color(color);
            }
        } else if self.base_color.is_some() || self.highlight_color.is_some() {
            tracing::warn!("shimmer colors are ignored unless `colored = true`");
        }

        Ok(builder)
    }
}

fn deserialize_millis_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;
    impl<'de> de::Visitor<'de> for Visitor {
        type Value = Option<i64>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a duration as milliseconds or human-readable string")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let duration = humantime::parse_duration(v.trim())
                .map_err(|err| E::custom(format!("invalid duration '{v}': {err}")))?;
            i64::try_from(duration.as_millis())
                .map(Some)
                .map_err(|_| E::custom(format!("duration '{v}' is too large")))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i64::try_from(v)
                .map(Some)
                .map_err(|_| E::custom("duration is too large"))
        }

        // Negative values pass through so the builder reports them.
        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.is_nan() {
                return Err(E::custom("duration must be a number"));
            }
            Ok(Some(v.round() as i64))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(Visitor)
}

fn deserialize_color_opt<'de, D>(deserializer: D) -> Result<Option<Rgba>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Helper {
        Str(String),
        Num(i64),
    }

    let helper: Option<Helper> = Option::deserialize(deserializer)?;
    let result = match helper {
        None => None,
        Some(Helper::Str(raw)) => Some(raw.parse::<Rgba>().map_err(de::Error::custom)?),
        Some(Helper::Num(value)) => {
            let argb = u32::try_from(value)
                .map_err(|_| de::Error::custom(format!("color {value} is not a 32-bit ARGB word")))?;
            Some(Rgba::from_argb(argb))
        }
    };
    Ok(result)
}
