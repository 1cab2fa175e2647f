use vulkanalia::prelude::v1_0::*;

pub const VALIDATION_ENABLED: bool = cfg!(debug_assertions);

pub const VALIDATION_LAYER: vk::ExtensionName =
    vk::ExtensionName::from_bytes(b"VK_LAYER_KHRONOS_validation");

pub const DEVICE_EXTENSIONS: &[vk::ExtensionName] = &[vk::KHR_SWAPCHAIN_EXTENSION.name];

pub const VERT_SHADER_PATH: &str = "shaders/vert.spv";
pub const FRAG_SHADER_PATH: &str = "shaders/frag.spv";

// Not shipped with the repo; place any RGBA8-encoded PNG here.
pub const TEXTURE_PATH: &str = "textures/grass.png";

pub const CLEAR_COLOR: [f32; 4] = [0.1, 0.2, 0.1, 1.0];
