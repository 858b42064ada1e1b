//! The built-in demo scene.

use vn_engine::{Engine, Image, Palette, Platform, Result, TileMap, TileSet};

const fn plate(w: u16, h: u16, color: u16) -> Image<'static> {
    let mut colors = [0u16; 16];
    colors[1] = color;
    Image {
        tileset: TileSet { num_tiles: w * h, tiles: &[] },
        tilemap: TileMap { w, h, tiles: &[] },
        palette: Palette(colors),
    }
}

const SHORE: Image<'static> = plate(40, 20, 0x0A62);
const LIGHTHOUSE: Image<'static> = plate(40, 20, 0x0422);
const KEEPER: Image<'static> = plate(6, 10, 0x08AE);

const MUSIC: &[u8] = &[0; 64];
const GULLS: &[u8] = &[0x80; 2048];

const LAMP: u8 = 1;
const DOOR: u8 = 2;
const LEAVE: u8 = 3;

pub fn run<P: Platform>(vn: &mut Engine<P>) -> Result<()> {
    vn.play_music(MUSIC);
    vn.show_background(&SHORE);
    vn.play_sound(GULLS);

    vn.append_text("The tide is out, and the lighthouse")?;
    vn.append_text("stands dark against the evening sky.")?;
    vn.wait(1);

    vn.show_background(&LIGHTHOUSE);
    vn.set_image_position(28, 6);
    vn.show_foreground_image(&KEEPER);
    vn.append_text("Keeper: \"You made it. Storm's coming.\"")?;
    vn.flush_text();

    loop {
        vn.append_text("Keeper: \"What'll it be?\"")?;
        vn.append_choice(LAMP, "Light the lamp")?;
        vn.append_choice(DOOR, "Bar the door")?;
        vn.append_choice(LEAVE, "Head back to the village")?;

        match vn.resolve_choice()? {
            Some(LAMP) => {
                vn.append_text("The lamp catches. Far out, a ship")?;
                vn.append_text("turns toward the light.")?;
                vn.flush_text();
                break;
            }
            Some(DOOR) => {
                vn.append_text("The door holds, but the dark tower")?;
                vn.append_text("is no help to anyone out at sea.")?;
                vn.flush_text();
            }
            _ => {
                vn.append_text("You turn back. The keeper sighs")?;
                vn.append_text("and climbs the stairs alone.")?;
                vn.flush_text();
                break;
            }
        }
    }

    vn.append_packed(b"THE END\n\nPress a button to quit.")?;
    vn.flush_text();
    Ok(())
}
