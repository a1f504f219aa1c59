//! Ground-device parts of an entity.
//!
//! A long ground device (a long tread, a pair of tandem wheels) touches the
//! ground at two points. The second point is a fake ground device: it has no
//! item of its own, mirrors its master's size and is removed together with the
//! master. Removing a fake directly does nothing; its lifecycle belongs to the
//! master.

use cgmath::Vector3;
use slotmap::{SlotMap, new_key_type};

use crate::definitions::{GroundDefinition, PartPlacement};

new_key_type! {
    pub struct PartId;
}

/// Size reported by a fake whose master is gone.
const DEFAULT_DIMENSION: f32 = 1.0;

#[derive(Clone, Debug)]
pub struct GroundDevice {
    pub placement: PartPlacement,
    pub definition: GroundDefinition,
    /// Registry name of the item this part drops when removed.
    pub item: String,
    fake: Option<PartId>,
}

#[derive(Clone, Debug)]
pub struct FakeGroundDevice {
    pub placement: PartPlacement,
    master: PartId,
}

#[derive(Clone, Debug)]
pub enum Part {
    GroundDevice(GroundDevice),
    Fake(FakeGroundDevice),
}

impl Part {
    pub fn placement(&self) -> &PartPlacement {
        match self {
            Part::GroundDevice(device) => &device.placement,
            Part::Fake(fake) => &fake.placement,
        }
    }

    pub fn is_fake(&self) -> bool {
        matches!(self, Part::Fake(_))
    }
}

/// The ground devices attached to one entity.
#[derive(Debug, Default)]
pub struct PartList {
    parts: SlotMap<PartId, Part>,
}

impl PartList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a ground device. If the placement declares a long-part offset a
    /// fake ground device is added at that offset along the z axis as well.
    pub fn add_ground_device(
        &mut self,
        placement: PartPlacement,
        definition: GroundDefinition,
        item: impl Into<String>,
    ) -> PartId {
        let long_offset = placement.long_part_offset;
        let fake_placement = long_offset.map(|offset| {
            let pos = Vector3::from(placement.pos) + Vector3::new(0.0, 0.0, offset);
            PartPlacement {
                pos: pos.into(),
                ..placement.clone()
            }
        });
        let master = self.parts.insert(Part::GroundDevice(GroundDevice {
            placement,
            definition,
            item: item.into(),
            fake: None,
        }));
        if let Some(placement) = fake_placement {
            let fake = self.parts.insert(Part::Fake(FakeGroundDevice { placement, master }));
            if let Some(Part::GroundDevice(device)) = self.parts.get_mut(master) {
                device.fake = Some(fake);
            }
        }
        master
    }

    pub fn get(&self, id: PartId) -> Option<&Part> {
        self.parts.get(id)
    }

    /// The fake ground device linked to the master `id`.
    pub fn fake_of(&self, id: PartId) -> Option<PartId> {
        match self.parts.get(id)? {
            Part::GroundDevice(device) => device.fake,
            Part::Fake(_) => None,
        }
    }

    pub fn is_fake(&self, id: PartId) -> bool {
        self.parts.get(id).is_some_and(Part::is_fake)
    }

    fn master(&self, fake: &FakeGroundDevice) -> Option<&GroundDevice> {
        match self.parts.get(fake.master)? {
            Part::GroundDevice(device) => Some(device),
            Part::Fake(_) => None,
        }
    }

    pub fn width(&self, id: PartId) -> Option<f32> {
        Some(match self.parts.get(id)? {
            Part::GroundDevice(device) => device.definition.width,
            Part::Fake(fake) => self
                .master(fake)
                .map_or(DEFAULT_DIMENSION, |master| master.definition.width),
        })
    }

    pub fn height(&self, id: PartId) -> Option<f32> {
        Some(match self.parts.get(id)? {
            Part::GroundDevice(device) => device.definition.height,
            Part::Fake(fake) => self
                .master(fake)
                .map_or(DEFAULT_DIMENSION, |master| master.definition.height),
        })
    }

    /// Offset to the other ground point of a long part. A fake reports its
    /// master's offset negated, pointing back at the master.
    pub fn long_part_offset(&self, id: PartId) -> Option<f32> {
        Some(match self.parts.get(id)? {
            Part::GroundDevice(device) => device.placement.long_part_offset.unwrap_or_default(),
            Part::Fake(fake) => self.master(fake).map_or(0.0, |master| {
                -master.placement.long_part_offset.unwrap_or_default()
            }),
        })
    }

    /// Registry name of the item the part drops. Fakes have none.
    pub fn item(&self, id: PartId) -> Option<&str> {
        match self.parts.get(id)? {
            Part::GroundDevice(device) => Some(&device.item),
            Part::Fake(_) => None,
        }
    }

    /// Removes a ground device and its fake. Removing a fake is a no-op and
    /// returns `false`.
    pub fn remove(&mut self, id: PartId) -> bool {
        let fake = match self.parts.get(id) {
            Some(Part::GroundDevice(device)) => device.fake,
            Some(Part::Fake(_)) | None => return false,
        };
        if let Some(fake) = fake {
            self.parts.remove(fake);
        }
        self.parts.remove(id);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (PartId, &Part)> {
        self.parts.iter()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
