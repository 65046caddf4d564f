/*
 * Boid Flocking Viewer
 *
 * Interactive front end for the flocking engine. The mouse cursor plays the
 * predator by default; press A to hand it to the AI hunter.
 */

use boid_engine::app;

fn main() {
    env_logger::init();
    nannou::app(app::model).update(app::update).run();
}
