//! Stream writers for the integration tests.

#![allow(dead_code)]

fn padded(tag: &str) -> [u8; 4] {
    let mut out = [b' '; 4];
    for (slot, byte) in out.iter_mut().zip(tag.bytes()) {
        *slot = byte;
    }
    out
}

/// Writes keyed entries after a 28-byte header.
pub struct Stream(Vec<u8>);

impl Stream {
    pub fn new() -> Self {
        let mut header = b"8BGR\x00\x05\x00\x00\x00\x10\x00\x00\x00\x01\x00\x00".to_vec();
        header.extend_from_slice(b"\x00\x00\x00\x00null\x00\x00\x00\x01");
        Stream(header)
    }

    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.0.extend_from_slice(bytes);
        self
    }

    fn u32(self, value: u32) -> Self {
        self.bytes(&value.to_be_bytes())
    }

    pub fn key(self, key: &str) -> Self {
        self.u32(0).bytes(&padded(key))
    }

    pub fn object_value(self, class: &str, children: u32) -> Self {
        self.bytes(b"Objc\x00\x00\x00\x01\x00\x00").key(class).u32(children)
    }

    pub fn object(self, key: &str, class: &str, children: u32) -> Self {
        self.key(key).object_value(class, children)
    }

    pub fn list(self, key: &str, count: u32) -> Self {
        self.key(key).bytes(b"VlLs").u32(count)
    }

    pub fn text(self, key: &str, text: &str) -> Self {
        let units: Vec<u16> = text.encode_utf16().collect();
        units
            .iter()
            .fold(self.key(key).bytes(b"TEXT").u32(units.len() as u32), |s, unit| {
                s.bytes(&unit.to_be_bytes())
            })
    }

    pub fn unit_float(self, key: &str, unit: &str, value: f64) -> Self {
        self.key(key).bytes(b"UntF").bytes(&padded(unit)).bytes(&value.to_be_bytes())
    }

    pub fn double(self, key: &str, value: f64) -> Self {
        self.key(key).bytes(b"doub").bytes(&value.to_be_bytes())
    }

    pub fn integer(self, key: &str, value: i32) -> Self {
        self.key(key).bytes(b"long").bytes(&value.to_be_bytes())
    }

    pub fn raw_data(self, key: &str, payload: &[u8]) -> Self {
        self.key(key).bytes(b"tdta").u32(payload.len() as u32).bytes(payload)
    }

    pub fn build(self) -> Vec<u8> {
        self.0
    }
}

#[derive(Clone, Copy)]
pub enum Color {
    Rgb(f64, f64, f64),
    Cmyk(f64, f64, f64, f64),
    Hsb(f64, f64, f64),
}

/// Stops of one gradient written by [`gradient_file`].
pub struct Gradient {
    name: &'static str,
    colors: Vec<(Color, i32)>,
    opacities: Vec<(f64, i32)>,
}

impl Gradient {
    pub fn new(name: &'static str) -> Self {
        Gradient {
            name,
            colors: Vec::new(),
            opacities: Vec::new(),
        }
    }

    pub fn color(mut self, color: Color, location: i32) -> Self {
        self.colors.push((color, location));
        self
    }

    pub fn opacity(mut self, percent: f64, location: i32) -> Self {
        self.opacities.push((percent, location));
        self
    }
}

fn color_object(stream: Stream, color: Color) -> Stream {
    match color {
        Color::Rgb(r, g, b) => stream
            .object("Clr", "RGBC", 3)
            .double("Rd", r)
            .double("Grn", g)
            .double("Bl", b),
        Color::Cmyk(c, m, y, k) => stream
            .object("Clr", "CMYC", 4)
            .double("Cyn", c)
            .double("Mgnt", m)
            .double("Ylw", y)
            .double("Blck", k),
        Color::Hsb(h, s, b) => stream
            .object("Clr", "HSBC", 3)
            .unit_float("H", "#Ang", h)
            .double("Strt", s)
            .double("Brgh", b),
    }
}

/// A complete file holding `gradients` in a top-level `GrdL` list.
pub fn gradient_file(gradients: &[Gradient]) -> Vec<u8> {
    let mut stream = Stream::new().list("GrdL", gradients.len() as u32);
    for gradient in gradients {
        stream = stream
            .object_value("Grdn", 1)
            .object("Grad", "Grdn", 3)
            .text("Nm", gradient.name)
            .list("Clrs", gradient.colors.len() as u32);
        for (color, location) in &gradient.colors {
            stream = color_object(stream.object_value("Clrt", 2), *color).integer("Lctn", *location);
        }
        stream = stream.list("Trns", gradient.opacities.len() as u32);
        for (percent, location) in &gradient.opacities {
            stream = stream
                .object_value("TrnS", 2)
                .unit_float("Opct", "#Prc", *percent)
                .integer("Lctn", *location);
        }
    }
    stream.build()
}
