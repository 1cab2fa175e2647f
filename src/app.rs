mod app_data;
mod app_defines;
mod buffer;
mod command_buffer;
mod depth;
mod descriptor;
mod framebuffer;
mod instance;
mod logical_device;
mod physical_device;
mod pipeline;
mod queue_family;
pub mod scene;
mod swapchain;
mod sync;
mod texture;

use std::mem::size_of;
use std::ptr::copy_nonoverlapping as memcpy;
use std::time::Instant;

use anyhow::{anyhow, Result};
use nalgebra_glm as glm;
use vulkanalia::loader::{LibloadingLoader, LIBRARY};
use vulkanalia::prelude::v1_0::*;
use vulkanalia::window as vk_window;
use winit::window::{Window};

use vulkanalia::vk::ExtDebugUtilsExtension;
use vulkanalia::vk::KhrSurfaceExtension;
use vulkanalia::vk::KhrSwapchainExtension;

use scene::{Scene, UniformBufferObject};

#[derive(Clone, Debug)]
pub struct App {
    entry: Entry,
    instance: Instance,
    data: app_data::Data,
    device: Device,
    scene: Scene,
    start: Instant,
    pub resized: bool,
}

impl App {
    pub unsafe fn create(window: &Window, scene: Scene) -> Result<Self> {
        let loader = LibloadingLoader::new(LIBRARY)?;
        let entry = Entry::new(loader).map_err(|b| anyhow!("{}", b))?;
        let mut data = app_data::Data::default();
        let instance = instance::create(window, &entry, &mut data)?;

        data.surface = vk_window::create_surface(&instance, &window, &window)?;
        physical_device::pick_physical_device(&instance, &mut data)?;

        let device = logical_device::create(&instance, &mut data)?;

        swapchain::create(window, &instance, &device, &mut data)?;
        swapchain::create_swapchain_image_views(&device, &mut data)?;

        pipeline::create_render_pass(&instance, &device, &mut data)?;
        descriptor::create_descriptor_set_layout(&device, &mut data)?;
        pipeline::create_pipeline(&device, &mut data)?;

        command_buffer::create_command_pool(&instance, &device, &mut data)?;

        depth::create(&instance, &device, &mut data)?;
        framebuffer::create(&device, &mut data)?;

        texture::create_texture_image(&instance, &device, &mut data)?;
        texture::create_texture_image_view(&device, &mut data)?;
        texture::create_texture_sampler(&device, &mut data)?;

        buffer::create_vertex_buffer(&instance, &device, &mut data, &scene)?;
        buffer::create_index_buffer(&instance, &device, &mut data, &scene)?;
        buffer::create_uniform_buffers(&instance, &device, &mut data)?;

        descriptor::create_descriptor_pool(&device, &mut data)?;
        descriptor::create_descriptor_set(&device, &mut data)?;

        command_buffer::create_command_buffers(&device, &mut data, scene.indices.len() as u32)?;

        sync::create_sync_objects(&device, &mut data)?;

        Ok(Self { entry, instance, data, device, scene, start: Instant::now(), resized: false })
    }

    pub unsafe fn render(&mut self, window: &Window) -> Result<()> {
        self.update_uniform_buffer()?;

        let result = self.device.acquire_next_image_khr(
            self.data.swapchain,
            u64::max_value(),
            self.data.image_available_semaphore,
            vk::Fence::null(),
        );

        let image_index = match result {
            Ok((image_index, _)) => image_index as usize,
            Err(vk::ErrorCode::OUT_OF_DATE_KHR) => return self.recreate_swapchain(window),
            Err(e) => return Err(anyhow!(e)),
        };

        let in_flight_fence = self.data.in_flight_fences[image_index];
        self.device.wait_for_fences(&[in_flight_fence], true, u64::max_value())?;
        self.device.reset_fences(&[in_flight_fence])?;

        let wait_semaphores = &[self.data.image_available_semaphore];
        let wait_stages = &[vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT];
        let command_buffers = &[self.data.command_buffers[image_index]];
        let signal_semaphores = &[self.data.render_finished_semaphore];
        let submit_info = vk::SubmitInfo::builder()
            .wait_semaphores(wait_semaphores)
            .wait_dst_stage_mask(wait_stages)
            .command_buffers(command_buffers)
            .signal_semaphores(signal_semaphores);

        self.device.queue_submit(self.data.graphics_queue, &[submit_info], in_flight_fence)?;

        let swapchains = &[self.data.swapchain];
        let image_indices = &[image_index as u32];
        let present_info = vk::PresentInfoKHR::builder()
            .wait_semaphores(signal_semaphores)
            .swapchains(swapchains)
            .image_indices(image_indices);

        let result = self.device.queue_present_khr(self.data.present_queue, &present_info);
        let changed = result == Ok(vk::SuccessCode::SUBOPTIMAL_KHR) || result == Err(vk::ErrorCode::OUT_OF_DATE_KHR);
        if self.resized || changed {
            self.resized = false;
            self.recreate_swapchain(window)?;
        } else if let Err(e) = result {
            return Err(anyhow!(e));
        }

        Ok(())
    }

    /// Recomputes the uniform block from elapsed wall-clock time and the
    /// current aspect ratio, then pushes it through the staged-copy path.
    unsafe fn update_uniform_buffer(&mut self) -> Result<()> {
        let time = self.start.elapsed().as_secs_f32();

        let model = glm::rotate(
            &glm::identity(),
            time * glm::radians(&glm::vec1(90.0))[0],
            &glm::vec3(0.0, 0.0, 1.0),
        );

        let view = glm::look_at(
            &glm::vec3(1.0, 1.0, 1.0),
            &glm::vec3(0.0, 0.0, 0.0),
            &glm::vec3(0.0, 0.0, 1.0),
        );

        let aspect = self.data.swapchain_extent.width as f32 / self.data.swapchain_extent.height as f32;
        let mut proj = glm::perspective(aspect, glm::radians(&glm::vec1(45.0))[0], 0.1, 100.0);

        // Vulkan's clip-space Y points down.
        proj[(1, 1)] *= -1.0;

        let ubo = UniformBufferObject { model, view, proj };

        let memory = self.device.map_memory(
            self.data.uniform_staging_buffer_memory,
            0,
            size_of::<UniformBufferObject>() as u64,
            vk::MemoryMapFlags::empty(),
        )?;

        memcpy(&ubo, memory.cast(), 1);

        self.device.unmap_memory(self.data.uniform_staging_buffer_memory);

        buffer::copy_buffer(
            &self.device,
            &self.data,
            self.data.uniform_staging_buffer,
            self.data.uniform_buffer,
            size_of::<UniformBufferObject>() as u64,
        )?;

        Ok(())
    }

    unsafe fn recreate_swapchain(&mut self, window: &Window) -> Result<()> {
        self.device.device_wait_idle()?;
        self.destroy_swapchain();

        swapchain::create(window, &self.instance, &self.device, &mut self.data)?;
        swapchain::create_swapchain_image_views(&self.device, &mut self.data)?;

        pipeline::create_render_pass(&self.instance, &self.device, &mut self.data)?;
        pipeline::create_pipeline(&self.device, &mut self.data)?;

        depth::create(&self.instance, &self.device, &mut self.data)?;
        framebuffer::create(&self.device, &mut self.data)?;

        command_buffer::create_command_buffers(&self.device, &mut self.data, self.scene.indices.len() as u32)?;

        sync::create_in_flight_fences(&self.device, &mut self.data)?;

        Ok(())
    }

    pub unsafe fn destroy(&mut self) {
        self.device.device_wait_idle().unwrap();

        self.destroy_swapchain();
        self.device.destroy_swapchain_khr(self.data.swapchain, None);

        self.data.in_flight_fences.iter().for_each(|f| self.device.destroy_fence(*f, None));
        self.device.destroy_semaphore(self.data.render_finished_semaphore, None);
        self.device.destroy_semaphore(self.data.image_available_semaphore, None);

        self.device.destroy_descriptor_pool(self.data.descriptor_pool, None);
        self.device.destroy_descriptor_set_layout(self.data.descriptor_set_layout, None);

        self.device.destroy_buffer(self.data.uniform_buffer, None);
        self.device.free_memory(self.data.uniform_buffer_memory, None);
        self.device.destroy_buffer(self.data.uniform_staging_buffer, None);
        self.device.free_memory(self.data.uniform_staging_buffer_memory, None);
        self.device.destroy_buffer(self.data.index_buffer, None);
        self.device.free_memory(self.data.index_buffer_memory, None);
        self.device.destroy_buffer(self.data.vertex_buffer, None);
        self.device.free_memory(self.data.vertex_buffer_memory, None);

        self.device.destroy_sampler(self.data.texture_sampler, None);
        self.device.destroy_image_view(self.data.texture_image_view, None);
        self.device.destroy_image(self.data.texture_image, None);
        self.device.free_memory(self.data.texture_image_memory, None);

        self.device.destroy_command_pool(self.data.command_pool, None);
        self.device.destroy_device(None);
        self.instance.destroy_surface_khr(self.data.surface, None);

        if app_defines::VALIDATION_ENABLED {
            self.instance.destroy_debug_utils_messenger_ext(self.data.messenger, None);
        }

        self.instance.destroy_instance(None);
    }

    /// Tears down everything that depends on the swapchain. The swapchain
    /// handle itself survives so that recreation can hand it to the driver
    /// as `old_swapchain`.
    unsafe fn destroy_swapchain(&mut self) {
        self.device.free_command_buffers(self.data.command_pool, &self.data.command_buffers);
        self.data.framebuffers.iter().for_each(|f| self.device.destroy_framebuffer(*f, None));
        self.device.destroy_image_view(self.data.depth_image_view, None);
        self.device.destroy_image(self.data.depth_image, None);
        self.device.free_memory(self.data.depth_image_memory, None);
        self.device.destroy_pipeline(self.data.pipeline, None);
        self.device.destroy_pipeline_layout(self.data.pipeline_layout, None);
        self.device.destroy_pipeline_cache(self.data.pipeline_cache, None);
        self.device.destroy_render_pass(self.data.render_pass, None);
        self.data.swapchain_image_views.iter().for_each(|v| self.device.destroy_image_view(*v, None));
    }
}
