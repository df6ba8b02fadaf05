//! GPU capability probing for the active GL context

use crate::context::{GlContext, IntegerQuery, StringQuery};
use crate::error::{ProbeError, ProbeResult};
use crate::mappings::{classify, GpuModel, GpuVendor};
use serde::{Deserialize, Serialize};

/// Identification and compute limits of the GPU behind a GL context.
///
/// Produced by [`request_gpu_info`]. A plain value: it holds no reference
/// to the context and never changes after the probe returns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuInfo {
    /// `GL_RENDERER`, empty if unavailable
    pub renderer_name: String,
    /// `GL_VENDOR`, empty if unavailable
    pub vendor_name: String,
    /// `GL_VERSION`, empty if unavailable
    pub version: String,
    /// `GL_MAJOR_VERSION`
    pub major_version: i32,
    /// `GL_MINOR_VERSION`
    pub minor_version: i32,
    /// Supported extensions in driver order
    pub extensions: Vec<String>,
    /// Shader storage buffer bindings available to compute shaders
    pub max_ssbo_bindings: i32,
    /// Image uniforms available to compute shaders
    pub max_image_bindings: i32,
    /// Work group size limit per dimension (x, y, z)
    pub max_work_group_size: [i32; 3],
    /// Total invocations allowed in one work group
    pub max_work_group_invocations: i32,
    /// Largest 2D texture dimension
    pub max_texture_size: i32,
    /// Image units across all stages
    pub max_image_units: i32,
    /// Layer limit of array textures
    pub max_array_texture_layers: i32,
    /// Vendor classified from the renderer string
    pub vendor: GpuVendor,
    /// Model classified from the renderer string, Adreno only
    pub model: GpuModel,
}

impl GpuInfo {
    /// ARM Mali GPU
    pub fn is_mali(&self) -> bool {
        self.vendor == GpuVendor::Mali
    }

    /// Qualcomm Adreno GPU
    pub fn is_adreno(&self) -> bool {
        self.vendor == GpuVendor::Adreno
    }

    /// Imagination PowerVR GPU
    pub fn is_powervr(&self) -> bool {
        self.vendor == GpuVendor::PowerVr
    }

    /// Intel GPU
    pub fn is_intel(&self) -> bool {
        self.vendor == GpuVendor::Intel
    }

    /// NVIDIA GPU
    pub fn is_nvidia(&self) -> bool {
        self.vendor == GpuVendor::Nvidia
    }

    /// Adreno 6xx or a later series
    pub fn is_adreno_6xx_or_higher(&self) -> bool {
        self.is_adreno() && self.model.adreno_series().is_some_and(|series| series >= 6)
    }

    /// Exact, case-sensitive extension lookup
    pub fn supports_extension(&self, name: &str) -> bool {
        self.extensions.iter().any(|extension| extension == name)
    }

    /// Context version is at least `major.minor`
    pub fn supports_version(&self, major: i32, minor: i32) -> bool {
        (self.major_version, self.minor_version) >= (major, minor)
    }
}

/// Probe the GPU behind `ctx`.
///
/// Reads identification strings and compute limits in a fixed order, then
/// checks the context's error queue exactly once. Missing identification
/// strings are not errors; they leave the field empty. Any GL error raised
/// during the pass fails the whole probe with [`ProbeError::Api`] and no
/// partial result is returned.
///
/// The context must be current on the calling thread.
///
/// # Example
///
/// ```
/// use gpuprobe::{request_gpu_info, GpuModel, GpuVendor, IntegerQuery, RecordedContext};
///
/// let mut ctx = RecordedContext::new()
///     .with_renderer("Adreno (TM) 540")
///     .with_integer(IntegerQuery::MajorVersion, 3)
///     .with_integer(IntegerQuery::MinorVersion, 1)
///     .with_integer(IntegerQuery::MaxComputeShaderStorageBlocks, 24)
///     .with_integer(IntegerQuery::MaxComputeImageUniforms, 8)
///     .with_work_group_size([1024, 1024, 64])
///     .with_integer(IntegerQuery::MaxComputeWorkGroupInvocations, 1024)
///     .with_integer(IntegerQuery::MaxTextureSize, 16384)
///     .with_integer(IntegerQuery::MaxImageUnits, 8)
///     .with_integer(IntegerQuery::MaxArrayTextureLayers, 2048);
///
/// let info = request_gpu_info(&mut ctx)?;
/// assert_eq!(info.vendor, GpuVendor::Adreno);
/// assert_eq!(info.model, GpuModel::Adreno540);
/// # Ok::<(), gpuprobe::ProbeError>(())
/// ```
pub fn request_gpu_info<C>(ctx: &mut C) -> ProbeResult<GpuInfo>
where
    C: GlContext + ?Sized,
{
    let mut info = GpuInfo::default();

    match ctx.get_string(StringQuery::Renderer) {
        Some(renderer) => {
            let (vendor, model) = classify(&renderer);
            info.vendor = vendor;
            info.model = model;
            info.renderer_name = renderer;
        }
        None => log::debug!("GL_RENDERER unavailable, vendor and model stay unknown"),
    }

    info.vendor_name = read_optional_string(ctx, StringQuery::Vendor);
    info.version = read_optional_string(ctx, StringQuery::Version);

    info.major_version = ctx.get_integer(IntegerQuery::MajorVersion);
    info.minor_version = ctx.get_integer(IntegerQuery::MinorVersion);

    // A negative count only comes with a GL error, which fails the probe below
    let extension_count = ctx.get_integer(IntegerQuery::NumExtensions).max(0) as u32;
    info.extensions = (0..extension_count)
        .map(|index| {
            ctx.get_string_indexed(StringQuery::Extensions, index)
                .unwrap_or_default()
        })
        .collect();
    log::debug!("read {} extensions", info.extensions.len());

    info.max_ssbo_bindings = ctx.get_integer(IntegerQuery::MaxComputeShaderStorageBlocks);
    info.max_image_bindings = ctx.get_integer(IntegerQuery::MaxComputeImageUniforms);
    for (dimension, size) in (0u32..).zip(info.max_work_group_size.iter_mut()) {
        *size = ctx.get_integer_indexed(IntegerQuery::MaxComputeWorkGroupSize, dimension);
    }
    info.max_work_group_invocations = ctx.get_integer(IntegerQuery::MaxComputeWorkGroupInvocations);
    info.max_texture_size = ctx.get_integer(IntegerQuery::MaxTextureSize);
    info.max_image_units = ctx.get_integer(IntegerQuery::MaxImageUnits);
    info.max_array_texture_layers = ctx.get_integer(IntegerQuery::MaxArrayTextureLayers);

    let errors = ctx.take_errors();
    if !errors.is_empty() {
        log::warn!("GPU probe failed with {} GL error(s)", errors.len());
        return Err(ProbeError::Api { errors });
    }

    log::info!(
        "detected {} ({}), OpenGL ES {}.{}",
        info.vendor,
        info.model,
        info.major_version,
        info.minor_version
    );
    Ok(info)
}

fn read_optional_string<C>(ctx: &mut C, name: StringQuery) -> String
where
    C: GlContext + ?Sized,
{
    ctx.get_string(name).unwrap_or_else(|| {
        log::debug!("{:?} string unavailable", name);
        String::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::MockGlContext;
    use crate::gl_errors::GlErrorCode;
    use mockall::predicate::eq;
    use mockall::Sequence;
    use pretty_assertions::assert_eq;

    fn limits(name: IntegerQuery) -> i32 {
        match name {
            IntegerQuery::MajorVersion => 3,
            IntegerQuery::MinorVersion => 1,
            IntegerQuery::NumExtensions => 2,
            IntegerQuery::MaxComputeShaderStorageBlocks => 24,
            IntegerQuery::MaxComputeImageUniforms => 4,
            IntegerQuery::MaxComputeWorkGroupInvocations => 512,
            IntegerQuery::MaxTextureSize => 8192,
            IntegerQuery::MaxImageUnits => 8,
            IntegerQuery::MaxArrayTextureLayers => 256,
            IntegerQuery::MaxComputeWorkGroupSize => -1,
        }
    }

    fn mock_context(renderer: Option<&'static str>, errors: Vec<GlErrorCode>) -> MockGlContext {
        let mut ctx = MockGlContext::new();
        ctx.expect_get_string().returning(move |name| match name {
            StringQuery::Renderer => renderer.map(String::from),
            StringQuery::Vendor => Some("Vendor Inc.".to_string()),
            StringQuery::Version => Some("OpenGL ES 3.1".to_string()),
            StringQuery::Extensions => None,
        });
        ctx.expect_get_string_indexed()
            .with(eq(StringQuery::Extensions), mockall::predicate::always())
            .returning(|_, index| Some(format!("GL_EXT_{}", index)));
        ctx.expect_get_integer().returning(limits);
        ctx.expect_get_integer_indexed()
            .with(eq(IntegerQuery::MaxComputeWorkGroupSize), mockall::predicate::always())
            .returning(|_, index| [256, 128, 64][index as usize]);
        ctx.expect_take_errors().times(1).return_once(move || errors);
        ctx
    }

    #[test]
    fn test_successful_probe_populates_every_field() {
        let mut ctx = mock_context(Some("Adreno (TM) 630"), Vec::new());
        let info = request_gpu_info(&mut ctx).unwrap();

        assert_eq!(
            info,
            GpuInfo {
                renderer_name: "Adreno (TM) 630".to_string(),
                vendor_name: "Vendor Inc.".to_string(),
                version: "OpenGL ES 3.1".to_string(),
                major_version: 3,
                minor_version: 1,
                extensions: vec!["GL_EXT_0".to_string(), "GL_EXT_1".to_string()],
                max_ssbo_bindings: 24,
                max_image_bindings: 4,
                max_work_group_size: [256, 128, 64],
                max_work_group_invocations: 512,
                max_texture_size: 8192,
                max_image_units: 8,
                max_array_texture_layers: 256,
                vendor: GpuVendor::Adreno,
                model: GpuModel::Adreno630,
            }
        );
    }

    #[test]
    fn test_missing_renderer_is_not_an_error() {
        let mut ctx = mock_context(None, Vec::new());
        let info = request_gpu_info(&mut ctx).unwrap();

        assert_eq!(info.renderer_name, "");
        assert_eq!(info.vendor, GpuVendor::Unknown);
        assert_eq!(info.model, GpuModel::Unknown);
        assert_eq!(info.max_texture_size, 8192);
    }

    #[test]
    fn test_errors_fail_the_whole_probe() {
        let mut ctx = mock_context(
            Some("Mali-G72"),
            vec![GlErrorCode::InvalidEnum, GlErrorCode::InvalidOperation],
        );
        let err = request_gpu_info(&mut ctx).unwrap_err();

        assert_eq!(
            err.gl_errors(),
            &[GlErrorCode::InvalidEnum, GlErrorCode::InvalidOperation]
        );
    }

    #[test]
    fn test_queries_run_in_order_and_errors_checked_last() {
        let mut seq = Sequence::new();
        let mut ctx = MockGlContext::new();

        ctx.expect_get_string()
            .with(eq(StringQuery::Renderer))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Some("PowerVR Rogue GE8320".to_string()));
        ctx.expect_get_string()
            .with(eq(StringQuery::Vendor))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| None);
        ctx.expect_get_string()
            .with(eq(StringQuery::Version))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| None);
        for name in [
            IntegerQuery::MajorVersion,
            IntegerQuery::MinorVersion,
            IntegerQuery::NumExtensions,
        ] {
            ctx.expect_get_integer()
                .with(eq(name))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|name| if name == IntegerQuery::NumExtensions { 1 } else { 3 });
        }
        ctx.expect_get_string_indexed()
            .with(eq(StringQuery::Extensions), eq(0))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Some("GL_EXT_color_buffer_float".to_string()));
        for name in [
            IntegerQuery::MaxComputeShaderStorageBlocks,
            IntegerQuery::MaxComputeImageUniforms,
        ] {
            ctx.expect_get_integer()
                .with(eq(name))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| 8);
        }
        for dimension in 0..3u32 {
            ctx.expect_get_integer_indexed()
                .with(eq(IntegerQuery::MaxComputeWorkGroupSize), eq(dimension))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, index| 512 >> index);
        }
        for name in [
            IntegerQuery::MaxComputeWorkGroupInvocations,
            IntegerQuery::MaxTextureSize,
            IntegerQuery::MaxImageUnits,
            IntegerQuery::MaxArrayTextureLayers,
        ] {
            ctx.expect_get_integer()
                .with(eq(name))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| 1024);
        }
        ctx.expect_take_errors()
            .times(1)
            .in_sequence(&mut seq)
            .returning(Vec::new);

        let info = request_gpu_info(&mut ctx).unwrap();
        assert_eq!(info.vendor, GpuVendor::PowerVr);
        assert_eq!(info.vendor_name, "");
        assert_eq!(info.extensions, vec!["GL_EXT_color_buffer_float".to_string()]);
        assert_eq!(info.max_work_group_size, [512, 256, 128]);
    }

    #[test]
    fn test_helpers() {
        let info = GpuInfo {
            major_version: 3,
            minor_version: 1,
            extensions: vec!["GL_EXT_texture_buffer".to_string()],
            vendor: GpuVendor::Adreno,
            model: GpuModel::Adreno630,
            ..GpuInfo::default()
        };

        assert!(info.is_adreno());
        assert!(!info.is_mali());
        assert!(info.is_adreno_6xx_or_higher());
        assert!(info.supports_extension("GL_EXT_texture_buffer"));
        assert!(!info.supports_extension("GL_EXT_texture"));
        assert!(info.supports_version(3, 1));
        assert!(info.supports_version(2, 9));
        assert!(!info.supports_version(3, 2));

        let older = GpuInfo { model: GpuModel::Adreno540, ..info };
        assert!(!older.is_adreno_6xx_or_higher());
    }
}
