//! Viewer configuration.
//!
//! Everything the viewer needs to know before it opens a window: which
//! regions exist and where their models live, the colours and lights of the
//! scene, the camera lens and the DOM hooks used on the web.

use cgmath::{Deg, Point3, Vector3};

/// The districts of West Bengal, in list order.
pub const DEFAULT_REGIONS: [&str; 19] = [
    "Bankura",
    "Barddhaman",
    "Birbhum",
    "Coochbihar",
    "Dakshin Dinajpur",
    "Darjeeling",
    "Howrah",
    "Hugli",
    "Jalpaiguri",
    "Kolkata",
    "Maldah",
    "Murshidabad",
    "Nadia",
    "North24Pgs",
    "Paschim Medinipur",
    "Purba Medinipur",
    "Purulia",
    "South24Pgs",
    "Uttar Dinajpur",
];

/// Converts one sRGB-encoded channel to linear.
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Converts a `0xRRGGBB` colour to linear RGB.
pub fn hex_to_linear(hex: u32) -> Vector3<f32> {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    Vector3::new(channel(16), channel(8), channel(0))
}

/// Rest and hover tint of the region material.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub rest: Vector3<f32>,
    pub hover: Vector3<f32>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            rest: hex_to_linear(0xf0f0f0),
            hover: hex_to_linear(0xf56e67),
        }
    }
}

/// One directional light plus ambient fill.
#[derive(Clone, Debug, PartialEq)]
pub struct Lighting {
    pub sun_position: Point3<f32>,
    pub sun_target: Point3<f32>,
    pub sun_color: Vector3<f32>,
    pub sun_intensity: f32,
    pub ambient_color: Vector3<f32>,
    pub ambient_intensity: f32,
    /// Half the width of the square area covered by the shadow map.
    pub shadow_extent: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            sun_position: Point3::new(10.0, 6.0, 10.0),
            sun_target: Point3::new(0.002, 0.0, 0.01),
            sun_color: hex_to_linear(0xf1f1f1),
            sun_intensity: 0.8,
            ambient_color: hex_to_linear(0xebf2f2),
            ambient_intensity: 0.6,
            shadow_extent: 8.0,
        }
    }
}

/// Linear distance fog.
#[derive(Clone, Debug, PartialEq)]
pub struct Fog {
    pub color: Vector3<f32>,
    pub near: f32,
    pub far: f32,
}

impl Default for Fog {
    fn default() -> Self {
        Self {
            color: hex_to_linear(0xf8f8f8),
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Perspective lens of the main camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Lens {
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fovy: Deg(75.0),
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ViewerConfig {
    /// Window title on native builds.
    pub title: String,
    /// Directory (native) or URL path (web) holding `<name>.gltf` files.
    pub asset_root: String,
    pub regions: Vec<String>,
    pub palette: Palette,
    pub lighting: Lighting,
    pub fog: Fog,
    pub lens: Lens,
    pub clear_colour: wgpu::Color,
    /// WebGL2 caps textures at 2048 on many devices.
    pub shadow_map_size: u32,
    pub canvas_id: String,
    pub list_selector: String,
    pub item_selector: String,
    pub stats_element_id: String,
}

impl ViewerConfig {
    pub fn asset_path(&self, region: &str) -> String {
        format!("{}/{}.gltf", self.asset_root.trim_end_matches('/'), region)
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let clear = hex_to_linear(0xfffaf2);
        Self {
            title: "West Bengal".to_string(),
            asset_root: "models".to_string(),
            regions: DEFAULT_REGIONS.iter().map(|name| name.to_string()).collect(),
            palette: Palette::default(),
            lighting: Lighting::default(),
            fog: Fog::default(),
            lens: Lens::default(),
            clear_colour: wgpu::Color {
                r: clear.x as f64,
                g: clear.y as f64,
                b: clear.z as f64,
                a: 0.8,
            },
            shadow_map_size: 2048,
            canvas_id: "canvas".to_string(),
            list_selector: "ul".to_string(),
            item_selector: "li".to_string(),
            stats_element_id: "stats".to_string(),
        }
    }
}
