use super::app_data;

use anyhow::{Result};
use vulkanalia::prelude::v1_0::*;

/// Two global semaphores order GPU work within a frame; one fence per
/// swapchain image tracks when that image's command buffer may be reused.
pub unsafe fn create_sync_objects(device: &Device, data: &mut app_data::Data) -> Result<()> {
    let semaphore_info = vk::SemaphoreCreateInfo::builder();

    data.image_available_semaphore = device.create_semaphore(&semaphore_info, None)?;
    data.render_finished_semaphore = device.create_semaphore(&semaphore_info, None)?;

    create_in_flight_fences(device, data)?;

    Ok(())
}

/// Tops the fence set up to one per swapchain image. A recreated chain
/// may report more images than the one it replaced; existing fences are
/// kept, since the images they guard have been drained by then.
/// New fences start signaled so their first frame does not deadlock.
pub unsafe fn create_in_flight_fences(device: &Device, data: &mut app_data::Data) -> Result<()> {
    let fence_info = vk::FenceCreateInfo::builder().flags(vk::FenceCreateFlags::SIGNALED);

    for _ in 0..fences_needed(data.in_flight_fences.len(), data.swapchain_images.len()) {
        data.in_flight_fences.push(device.create_fence(&fence_info, None)?);
    }

    Ok(())
}

fn fences_needed(have: usize, images: usize) -> usize {
    images.saturating_sub(have)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fence_set_grows_to_cover_every_image() {
        assert_eq!(fences_needed(0, 3), 3);
        assert_eq!(fences_needed(3, 3), 0);
        assert_eq!(fences_needed(3, 4), 1);
    }

    #[test]
    fn fence_set_never_shrinks() {
        // Surplus fences stay allocated; teardown destroys them all.
        assert_eq!(fences_needed(4, 3), 0);
    }
}
