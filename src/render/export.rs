//! SVG export of a rendered scene.

use svg::Document;
use svg::node::element::{Circle, Definitions, Group, LinearGradient, Path, Stop, Text};

use super::scene::{Primitive, Scene};

impl Scene {
    /// Serialize the scene as a standalone SVG document of the given size.
    ///
    /// Links, nodes and labels each get a group translated to the canvas
    /// centre.
    pub fn to_svg(&self, width: f64, height: f64) -> String {
        let centre = format!("translate({},{})", width / 2.0, height / 2.0);
        let mut defs = Definitions::new();
        let mut links = Group::new()
            .set("transform", centre.clone())
            .set("fill", "none");
        let mut nodes = Group::new().set("transform", centre.clone());
        let mut labels = Group::new().set("transform", centre);

        for primitive in self.primitives() {
            match primitive {
                Primitive::Gradient {
                    id,
                    rotation,
                    from,
                    to,
                } => {
                    let gradient = LinearGradient::new()
                        .set("id", id.as_str())
                        .set("gradientTransform", format!("rotate({rotation})"))
                        .add(Stop::new().set("offset", "0%").set("stop-color", from.as_str()))
                        .add(Stop::new().set("offset", "100%").set("stop-color", to.as_str()));
                    defs = defs.add(gradient);
                }
                Primitive::Link {
                    d,
                    stroke,
                    stroke_opacity,
                    stroke_width,
                    ..
                } => {
                    links = links.add(
                        Path::new()
                            .set("d", d.as_str())
                            .set("stroke", stroke.as_str())
                            .set("stroke-opacity", *stroke_opacity)
                            .set("stroke-width", *stroke_width),
                    );
                }
                Primitive::Node {
                    node_id,
                    transform,
                    r,
                    fill,
                    ..
                } => {
                    nodes = nodes.add(
                        Circle::new()
                            .set("data-id", node_id.as_str())
                            .set("transform", transform.as_str())
                            .set("r", *r)
                            .set("fill", fill.as_str()),
                    );
                }
                Primitive::Label {
                    text,
                    transform,
                    x,
                    dy,
                    anchor,
                    fill,
                    ..
                } => {
                    labels = labels.add(
                        Text::new(text.as_str())
                            .set("dy", dy.as_str())
                            .set("x", *x)
                            .set("text-anchor", anchor.as_str())
                            .set("stroke", fill.as_str())
                            .set("transform", transform.as_str()),
                    );
                }
            }
        }

        Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height))
            .add(defs)
            .add(links)
            .add(nodes)
            .add(labels)
            .to_string()
    }
}
