//! Output formats, GIF quality presets, and the ffmpeg command builders.
//!
//! Commands are built as shell strings and executed through `bash -c` by the
//! shell provider, so values compose with `;` exactly as they would when
//! typed into a terminal. The GIF path is a two-stage palette pipeline: a
//! quality-dependent frame rate feeds both palette generation and the final
//! paletted encode, while the scale and dithering parameters stay fixed
//! across presets.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Shared palette file for the two-stage GIF pipeline.
const PALETTE_PATH: &str = "/tmp/palette.png";

/// Recognized output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Gif,
    Mov,
    Mp4,
}

impl OutputKind {
    pub const ALL: [OutputKind; 3] = [OutputKind::Gif, OutputKind::Mov, OutputKind::Mp4];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputKind::Gif => "gif",
            OutputKind::Mov => "mov",
            OutputKind::Mp4 => "mp4",
        }
    }

    /// File extension of the final artifact, equal to the lowercase name.
    pub fn file_extension(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gif" => Ok(OutputKind::Gif),
            "mov" => Ok(OutputKind::Mov),
            "mp4" => Ok(OutputKind::Mp4),
            other => Err(format!("unknown output type: {other}")),
        }
    }
}

/// GIF quality presets. Only the sampled frame rate varies between levels;
/// higher quality means more frames and a larger file. Ignored for `mov`
/// and `mp4` outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    Low,
    Medium,
    High,
}

impl QualityLevel {
    pub const ALL: [QualityLevel; 3] = [
        QualityLevel::Low,
        QualityLevel::Medium,
        QualityLevel::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLevel::Low => "low",
            QualityLevel::Medium => "medium",
            QualityLevel::High => "high",
        }
    }

    /// Frames per second sampled from the source recording.
    pub fn frame_rate(&self) -> u32 {
        match self {
            QualityLevel::Low => 5,
            QualityLevel::Medium => 15,
            QualityLevel::High => 30,
        }
    }
}

impl std::fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QualityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(QualityLevel::Low),
            "medium" => Ok(QualityLevel::Medium),
            "high" => Ok(QualityLevel::High),
            other => Err(format!("unknown quality: {other}")),
        }
    }
}

/// Build the shell command that turns `source` into `target`.
///
/// When `custom_ffmpeg_dir` is set it is appended to `$PATH` for this
/// invocation only, so a user-provided ffmpeg wins without mutating the
/// global environment.
pub fn encode_command(
    output: OutputKind,
    quality: QualityLevel,
    source: &str,
    target: &str,
    custom_ffmpeg_dir: Option<&str>,
) -> String {
    let mut command = Vec::new();

    if let Some(dir) = custom_ffmpeg_dir {
        command.push(format!("export PATH=$PATH:{dir}"));
    }

    match output {
        OutputKind::Gif => command.push(gif_pipeline(quality, source, target)),
        OutputKind::Mov => command.push(format!("cp {source} {target}")),
        OutputKind::Mp4 => {
            command.push(format!("ffmpeg -i {source} -vcodec h264 -acodec mp2 {target}"))
        }
    }

    command.join(";")
}

/// Two-stage palette pipeline: derive a palette from the source with a
/// quality-dependent fps filter, then apply it with fixed bayer dithering.
fn gif_pipeline(quality: QualityLevel, source: &str, target: &str) -> String {
    let set_palette = format!(r#"palette="{PALETTE_PATH}""#);
    let configure_filters = format!(
        r#"filters="fps={},scale=320:-1:flags=lanczos""#,
        quality.frame_rate()
    );
    let generate_palette = format!(
        r#"ffmpeg -nostdin -v warning -i {source} -vf "$filters,palettegen=stats_mode=diff" -y $palette"#
    );
    let apply_palette = format!(
        r#"ffmpeg -nostdin -i {source} -i $palette -lavfi "$filters,paletteuse=dither=bayer:bayer_scale=5:diff_mode=rectangle" -y {target}"#
    );

    [set_palette, configure_filters, generate_palette, apply_palette].join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_matches_lowercase_name() {
        assert_eq!(OutputKind::Gif.file_extension(), "gif");
        assert_eq!(OutputKind::Mov.file_extension(), "mov");
        assert_eq!(OutputKind::Mp4.file_extension(), "mp4");
    }

    #[test]
    fn test_lowercase_round_trip() {
        for kind in OutputKind::ALL {
            assert_eq!(kind.to_string().parse::<OutputKind>().unwrap(), kind);
        }
        for quality in QualityLevel::ALL {
            assert_eq!(quality.to_string().parse::<QualityLevel>().unwrap(), quality);
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        for kind in OutputKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
            assert_eq!(serde_json::from_str::<OutputKind>(&json).unwrap(), kind);
        }
        for quality in QualityLevel::ALL {
            let json = serde_json::to_string(&quality).unwrap();
            assert_eq!(json, format!("\"{quality}\""));
            assert_eq!(serde_json::from_str::<QualityLevel>(&json).unwrap(), quality);
        }
    }

    #[test]
    fn test_frame_rate_per_quality() {
        assert_eq!(QualityLevel::Low.frame_rate(), 5);
        assert_eq!(QualityLevel::Medium.frame_rate(), 15);
        assert_eq!(QualityLevel::High.frame_rate(), 30);
    }

    #[test]
    fn test_gif_command_varies_only_fps() {
        for quality in QualityLevel::ALL {
            let command = encode_command(
                OutputKind::Gif,
                quality,
                "/tmp/in.mov",
                "/tmp/out.gif",
                None,
            );
            assert!(command.contains(&format!("fps={}", quality.frame_rate())));
            assert!(command.contains("scale=320:-1:flags=lanczos"));
            assert!(command.contains("palettegen=stats_mode=diff"));
            assert!(command.contains("paletteuse=dither=bayer:bayer_scale=5:diff_mode=rectangle"));
            assert!(command.ends_with("-y /tmp/out.gif"));
        }
    }

    #[test]
    fn test_mov_is_a_plain_copy() {
        let command = encode_command(
            OutputKind::Mov,
            QualityLevel::Medium,
            "/tmp/in.mov",
            "/tmp/out.mov",
            None,
        );
        assert_eq!(command, "cp /tmp/in.mov /tmp/out.mov");
    }

    #[test]
    fn test_mp4_uses_fixed_codec_pair() {
        let command = encode_command(
            OutputKind::Mp4,
            QualityLevel::High,
            "/tmp/in.mov",
            "/tmp/out.mp4",
            None,
        );
        assert_eq!(
            command,
            "ffmpeg -i /tmp/in.mov -vcodec h264 -acodec mp2 /tmp/out.mp4"
        );
    }

    #[test]
    fn test_quality_is_ignored_for_non_gif_kinds() {
        for quality in QualityLevel::ALL {
            let mov = encode_command(OutputKind::Mov, quality, "a.mov", "b.mov", None);
            assert_eq!(mov, "cp a.mov b.mov");
            let mp4 = encode_command(OutputKind::Mp4, quality, "a.mov", "b.mp4", None);
            assert_eq!(mp4, "ffmpeg -i a.mov -vcodec h264 -acodec mp2 b.mp4");
        }
    }

    #[test]
    fn test_custom_ffmpeg_dir_prepends_path_export() {
        let command = encode_command(
            OutputKind::Gif,
            QualityLevel::Medium,
            "in.mov",
            "out.gif",
            Some("/opt/ffmpeg/bin"),
        );
        assert!(command.starts_with("export PATH=$PATH:/opt/ffmpeg/bin;"));

        let without = encode_command(OutputKind::Gif, QualityLevel::Medium, "in.mov", "out.gif", None);
        assert!(!without.contains("export PATH"));
    }
}
