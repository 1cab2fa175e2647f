use super::app_data;
use super::queue_family;
use super::texture;

use anyhow::{Result};
use log::*;
use vulkanalia::prelude::v1_0::*;
use winit::window::Window;

use vulkanalia::vk::KhrSurfaceExtension;
use vulkanalia::vk::KhrSwapchainExtension;

/// Everything the surface reports about what it can present.
#[derive(Clone, Debug)]
pub struct SwapchainSupport {
    pub capabilities: vk::SurfaceCapabilitiesKHR,
    pub formats: Vec<vk::SurfaceFormatKHR>,
    pub present_modes: Vec<vk::PresentModeKHR>,
}

impl SwapchainSupport {
    pub unsafe fn get(instance: &Instance, data: &app_data::Data, physical_device: vk::PhysicalDevice) -> Result<Self> {
        Ok(Self {
            capabilities: instance.get_physical_device_surface_capabilities_khr(physical_device, data.surface)?,
            formats: instance.get_physical_device_surface_formats_khr(physical_device, data.surface)?,
            present_modes: instance.get_physical_device_surface_present_modes_khr(physical_device, data.surface)?,
        })
    }
}

fn choose_surface_format(formats: &[vk::SurfaceFormatKHR]) -> vk::SurfaceFormatKHR {
    let preferred = vk::SurfaceFormatKHR {
        format: vk::Format::B8G8R8A8_UNORM,
        color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
    };

    // A single UNDEFINED entry means the surface accepts any format.
    if formats.len() == 1 && formats[0].format == vk::Format::UNDEFINED {
        return preferred;
    }

    formats
        .iter()
        .copied()
        .find(|f| f.format == preferred.format && f.color_space == preferred.color_space)
        .unwrap_or(formats[0])
}

fn choose_present_mode(present_modes: &[vk::PresentModeKHR]) -> vk::PresentModeKHR {
    let mut best_mode = vk::PresentModeKHR::FIFO;
    for mode in present_modes.iter().copied() {
        if mode == vk::PresentModeKHR::MAILBOX {
            return mode;
        } else if mode == vk::PresentModeKHR::IMMEDIATE {
            best_mode = mode;
        }
    }

    best_mode
}

fn choose_extent(capabilities: &vk::SurfaceCapabilitiesKHR, width: u32, height: u32) -> vk::Extent2D {
    // A fixed current extent is authoritative.
    if capabilities.current_extent.width != u32::max_value() {
        return capabilities.current_extent;
    }

    vk::Extent2D {
        width: width.clamp(capabilities.min_image_extent.width, capabilities.max_image_extent.width),
        height: height.clamp(capabilities.min_image_extent.height, capabilities.max_image_extent.height),
    }
}

fn choose_image_count(capabilities: &vk::SurfaceCapabilitiesKHR) -> u32 {
    let mut image_count = capabilities.min_image_count + 1;
    // max_image_count == 0 means the surface imposes no upper bound.
    if capabilities.max_image_count != 0 && image_count > capabilities.max_image_count {
        image_count = capabilities.max_image_count;
    }

    image_count
}

pub unsafe fn create(window: &Window, instance: &Instance, device: &Device, data: &mut app_data::Data) -> Result<()> {
    let indices = queue_family::QueueFamilyIndices::get(instance, data, data.physical_device)?;
    let support = SwapchainSupport::get(instance, data, data.physical_device)?;

    let surface_format = choose_surface_format(&support.formats);
    let present_mode = choose_present_mode(&support.present_modes);
    let size = window.inner_size();
    let extent = choose_extent(&support.capabilities, size.width, size.height);
    let image_count = choose_image_count(&support.capabilities);

    let mut queue_family_indices = vec![];
    let image_sharing_mode = if indices.graphics != indices.present {
        queue_family_indices.push(indices.graphics);
        queue_family_indices.push(indices.present);
        vk::SharingMode::CONCURRENT
    } else {
        vk::SharingMode::EXCLUSIVE
    };

    // The superseded swapchain is handed to the driver so it can reuse
    // its resources, then destroyed once the new one exists.
    let old_swapchain = data.swapchain;

    let info = vk::SwapchainCreateInfoKHR::builder()
        .surface(data.surface)
        .min_image_count(image_count)
        .image_format(surface_format.format)
        .image_color_space(surface_format.color_space)
        .image_extent(extent)
        .image_array_layers(1)
        .image_usage(vk::ImageUsageFlags::COLOR_ATTACHMENT)
        .image_sharing_mode(image_sharing_mode)
        .queue_family_indices(&queue_family_indices)
        .pre_transform(support.capabilities.current_transform)
        .composite_alpha(vk::CompositeAlphaFlagsKHR::OPAQUE)
        .present_mode(present_mode)
        .clipped(true)
        .old_swapchain(old_swapchain);

    data.swapchain = device.create_swapchain_khr(&info, None)?;

    if !old_swapchain.is_null() {
        device.destroy_swapchain_khr(old_swapchain, None);
    }

    data.swapchain_images = device.get_swapchain_images_khr(data.swapchain)?;
    data.swapchain_format = surface_format.format;
    data.swapchain_extent = extent;

    debug!(
        "Created swapchain ({} images, {:?}, {:?}, {}x{}).",
        data.swapchain_images.len(), surface_format.format, present_mode, extent.width, extent.height,
    );

    Ok(())
}

pub unsafe fn create_swapchain_image_views(device: &Device, data: &mut app_data::Data) -> Result<()> {
    data.swapchain_image_views = data.swapchain_images
        .iter()
        .map(|i| texture::create_image_view(device, *i, data.swapchain_format, vk::ImageAspectFlags::COLOR))
        .collect::<Result<Vec<_>>>()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capabilities(min_count: u32, max_count: u32) -> vk::SurfaceCapabilitiesKHR {
        vk::SurfaceCapabilitiesKHR {
            min_image_count: min_count,
            max_image_count: max_count,
            ..Default::default()
        }
    }

    #[test]
    fn image_count_is_min_plus_one_when_unbounded() {
        assert_eq!(choose_image_count(&capabilities(2, 0)), 3);
    }

    #[test]
    fn image_count_clamps_to_max() {
        assert_eq!(choose_image_count(&capabilities(3, 3)), 3);
        assert_eq!(choose_image_count(&capabilities(2, 8)), 3);
    }

    #[test]
    fn image_count_stays_within_reported_bounds() {
        for min in 1..8 {
            for max in min..16 {
                let count = choose_image_count(&capabilities(min, max));
                assert!(count >= min && count <= max, "count {} outside [{}, {}]", count, min, max);
            }
        }
    }

    #[test]
    fn fixed_current_extent_is_authoritative() {
        let capabilities = vk::SurfaceCapabilitiesKHR {
            current_extent: vk::Extent2D { width: 640, height: 480 },
            min_image_extent: vk::Extent2D { width: 800, height: 600 },
            max_image_extent: vk::Extent2D { width: 800, height: 600 },
            ..Default::default()
        };

        // No clamping applies, even though the window disagrees.
        let extent = choose_extent(&capabilities, 1024, 768);
        assert_eq!(extent.width, 640);
        assert_eq!(extent.height, 480);
    }

    #[test]
    fn flexible_extent_clamps_window_size() {
        let capabilities = vk::SurfaceCapabilitiesKHR {
            current_extent: vk::Extent2D { width: u32::max_value(), height: u32::max_value() },
            min_image_extent: vk::Extent2D { width: 200, height: 200 },
            max_image_extent: vk::Extent2D { width: 800, height: 600 },
            ..Default::default()
        };

        let extent = choose_extent(&capabilities, 1024, 100);
        assert_eq!(extent.width, 800);
        assert_eq!(extent.height, 200);

        let extent = choose_extent(&capabilities, 640, 480);
        assert_eq!(extent.width, 640);
        assert_eq!(extent.height, 480);
    }

    #[test]
    fn surface_format_prefers_bgra_srgb_nonlinear() {
        let formats = [
            vk::SurfaceFormatKHR {
                format: vk::Format::R8G8B8A8_UNORM,
                color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
            },
            vk::SurfaceFormatKHR {
                format: vk::Format::B8G8R8A8_UNORM,
                color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
            },
        ];

        let format = choose_surface_format(&formats);
        assert_eq!(format.format, vk::Format::B8G8R8A8_UNORM);
        assert_eq!(format.color_space, vk::ColorSpaceKHR::SRGB_NONLINEAR);
    }

    #[test]
    fn undefined_surface_format_means_any() {
        let formats = [vk::SurfaceFormatKHR {
            format: vk::Format::UNDEFINED,
            color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
        }];

        let format = choose_surface_format(&formats);
        assert_eq!(format.format, vk::Format::B8G8R8A8_UNORM);
    }

    #[test]
    fn first_surface_format_is_last_resort() {
        let formats = [
            vk::SurfaceFormatKHR {
                format: vk::Format::R8G8B8A8_SRGB,
                color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
            },
            vk::SurfaceFormatKHR {
                format: vk::Format::R8G8B8A8_UNORM,
                color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
            },
        ];

        assert_eq!(choose_surface_format(&formats).format, vk::Format::R8G8B8A8_SRGB);
    }

    #[test]
    fn present_mode_prefers_mailbox_then_immediate_then_fifo() {
        let modes = [
            vk::PresentModeKHR::FIFO,
            vk::PresentModeKHR::IMMEDIATE,
            vk::PresentModeKHR::MAILBOX,
        ];
        assert_eq!(choose_present_mode(&modes), vk::PresentModeKHR::MAILBOX);

        let modes = [vk::PresentModeKHR::FIFO, vk::PresentModeKHR::IMMEDIATE];
        assert_eq!(choose_present_mode(&modes), vk::PresentModeKHR::IMMEDIATE);

        let modes = [vk::PresentModeKHR::FIFO];
        assert_eq!(choose_present_mode(&modes), vk::PresentModeKHR::FIFO);
    }
}
